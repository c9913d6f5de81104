//! Static controlled vocabularies and allow-lists.
//!
//! Everything here is immutable data loaded once at process start and passed
//! by reference into the matcher and normalizer, so those components stay
//! independently testable.

/// LinkedIn-style industry taxonomy accepted by the company search API.
pub const INDUSTRY_DATA: &[&str] = &[
    "Accounting",
    "Advertising Services",
    "Airlines and Aviation",
    "Artificial Intelligence",
    "Automotive",
    "Banking",
    "Biotechnology",
    "Blockchain Services",
    "Business Consulting and Services",
    "Capital Markets",
    "Chemicals",
    "Civil Engineering",
    "Computer Hardware",
    "Computer and Network Security",
    "Construction",
    "Consumer Electronics",
    "Consumer Goods",
    "Defense and Space Manufacturing",
    "E-Learning Providers",
    "Education",
    "Entertainment Providers",
    "Environmental Services",
    "Financial Services",
    "Food and Beverage Services",
    "Gaming",
    "Government Administration",
    "Healthcare",
    "Hospitality",
    "Hospitals and Health Care",
    "Human Resources Services",
    "Information Technology and Services",
    "Insurance",
    "Internet Marketplace Platforms",
    "Investment Banking",
    "Investment Management",
    "Legal Services",
    "Logistics and Supply Chain",
    "Machine Learning",
    "Machinery Manufacturing",
    "Manufacturing",
    "Marketing Services",
    "Media Production",
    "Medical Devices",
    "Mining",
    "Oil and Gas",
    "Pharmaceutical Manufacturing",
    "Professional Services",
    "Real Estate",
    "Renewable Energy",
    "Research Services",
    "Retail",
    "Robotics Engineering",
    "Semiconductor Manufacturing",
    "Software Development",
    "Staffing and Recruiting",
    "Technology, Information and Internet",
    "Telecommunications",
    "Transportation and Logistics",
    "Travel Arrangements",
    "Venture Capital and Private Equity Principals",
    "Wellness and Fitness Services",
];

/// Region display names paired with the numeric ids the search API expects.
pub const REGION_DATA: &[(&str, &str)] = &[
    ("New York City Metropolitan Area", "90000070"),
    ("San Francisco Bay Area", "90000084"),
    ("Greater Los Angeles Area", "90000049"),
    ("Greater Boston", "90000007"),
    ("Seattle Metropolitan Area", "90000091"),
    ("Austin Metropolitan Area", "90000064"),
    ("Greater Chicago Area", "90000014"),
    ("Dallas-Fort Worth Metroplex", "90000031"),
    ("Washington DC-Baltimore Area", "90000097"),
    ("Denver Metropolitan Area", "90000034"),
    ("Atlanta Metropolitan Area", "90000052"),
    ("Miami-Fort Lauderdale Area", "90000056"),
    ("Mountain View Metropolitan Area", "90000198"),
    ("Palo Alto Metropolitan Area", "90000203"),
    ("Greater Toronto Area, Canada", "90009551"),
    ("London Area, United Kingdom", "90009496"),
    ("Berlin Metropolitan Area, Germany", "90009706"),
    ("Paris Metropolitan Region, France", "90009668"),
    ("Amsterdam Area, Netherlands", "90009817"),
    ("Dublin Metropolitan Area, Ireland", "90009824"),
    ("Stockholm Metropolitan Area, Sweden", "90009882"),
    ("Zurich Metropolitan Area, Switzerland", "90009889"),
    ("Tel Aviv Metropolitan Area, Israel", "90010119"),
    ("Singapore", "102454443"),
    ("Sydney Metropolitan Area, Australia", "90009524"),
    ("Bengaluru Area, India", "90009633"),
    ("Mumbai Area, India", "90009642"),
    ("Delhi Area, India", "90009639"),
    ("Tokyo Metropolitan Area, Japan", "90010100"),
    ("Sao Paulo Area, Brazil", "90009574"),
];

/// Alias -> canonical-name pairs consulted before fuzzy matching. Keys are
/// lower-cased; the canonical value must still exist in the target vocabulary
/// for the synonym to apply.
pub const SYNONYMS: &[(&str, &str)] = &[
    // Regions. Conservative on purpose: a wrong geography is worse than none.
    ("nyc", "New York City Metropolitan Area"),
    ("new york", "New York City Metropolitan Area"),
    ("new york city", "New York City Metropolitan Area"),
    ("sf", "San Francisco Bay Area"),
    ("san francisco", "San Francisco Bay Area"),
    ("silicon valley", "San Francisco Bay Area"),
    ("la", "Greater Los Angeles Area"),
    ("los angeles", "Greater Los Angeles Area"),
    ("boston", "Greater Boston"),
    ("greater boston", "Greater Boston"),
    ("chicago", "Greater Chicago Area"),
    ("seattle", "Seattle Metropolitan Area"),
    ("austin", "Austin Metropolitan Area"),
    ("mountain view", "Mountain View Metropolitan Area"),
    ("palo alto", "Palo Alto Metropolitan Area"),
    ("london", "London Area, United Kingdom"),
    ("bangalore", "Bengaluru Area, India"),
    ("bengaluru", "Bengaluru Area, India"),
    ("bombay", "Mumbai Area, India"),
    ("mumbai", "Mumbai Area, India"),
    // Industries.
    ("fintech", "Financial Services"),
    ("finance", "Financial Services"),
    ("banking", "Banking"),
    ("ai", "Artificial Intelligence"),
    ("artificial intelligence", "Artificial Intelligence"),
    ("ml", "Machine Learning"),
    ("machine learning", "Machine Learning"),
    ("saas", "Software Development"),
    ("software as a service", "Software Development"),
    ("software", "Software Development"),
    ("sw", "Software Development"),
    ("sw dev", "Software Development"),
    ("tech", "Technology, Information and Internet"),
    ("technology", "Technology, Information and Internet"),
    ("biotech", "Biotechnology"),
    ("pharma", "Pharmaceutical Manufacturing"),
    ("cybersecurity", "Computer and Network Security"),
    ("vc", "Venture Capital and Private Equity Principals"),
];

/// Free-form tag/keyword terms mapped to the exact keyword strings the
/// search backend indexes. Targets of this map are never keys themselves,
/// which keeps keyword normalization a fixpoint.
pub const KEYWORD_MAPPING: &[(&str, &str)] = &[
    // Funding status
    ("seed-funded", "seed funding"),
    ("seed funded", "seed funding"),
    ("seed", "seed funding"),
    ("series a", "series a funding"),
    ("series b", "series b funding"),
    ("series c", "series c funding"),
    ("bootstrap", "bootstrapped"),
    ("vc funded", "venture capital"),
    ("venture funded", "venture capital"),
    ("angel invested", "angel investors"),
    ("angel funding", "angel investors"),
    // Company size
    ("smb", "small business"),
    ("midsize", "midsize company"),
    ("mid-size", "midsize company"),
    // Business focus
    ("d2c", "direct to consumer"),
    // Technology
    ("cloud-based", "cloud technology"),
    ("cloud based", "cloud technology"),
    ("mobile-first", "mobile first"),
    ("ai-powered", "artificial intelligence"),
    ("ai driven", "artificial intelligence"),
    ("data-driven", "data driven"),
    // Growth and status
    ("high-growth", "high growth"),
    ("fast-growing", "high growth"),
    ("growing", "growth stage"),
    // Industry-specific tags
    ("fintech", "financial technology"),
    ("healthtech", "health technology"),
    ("medtech", "medical technology"),
    ("edtech", "education technology"),
    ("proptech", "property technology"),
    ("insurtech", "insurance technology"),
    ("cleantech", "clean technology"),
];

/// The nine headcount buckets the company search API accepts, verbatim.
pub const COMPANY_HEADCOUNT_VALUES: &[&str] = &[
    "Self-employed",
    "1-10",
    "11-50",
    "51-200",
    "201-500",
    "501-1,000",
    "1,001-5,000",
    "5,001-10,000",
    "10,001+",
];

/// Tenure buckets shared by YEARS_OF_EXPERIENCE, YEARS_AT_CURRENT_COMPANY
/// and YEARS_IN_CURRENT_POSITION.
pub const YEARS_RANGE_VALUES: &[&str] = &[
    "Less than 1 year",
    "1 to 2 years",
    "3 to 5 years",
    "6 to 10 years",
    "More than 10 years",
];

pub const ACCOUNT_ACTIVITY_VALUES: &[&str] = &[
    "Senior leadership changes in last 3 months",
    "Funding events in past 12 months",
];

pub const JOB_OPPORTUNITY_VALUES: &[&str] = &["Hiring on Linkedin"];

pub const SENIORITY_LEVEL_VALUES: &[&str] = &[
    "Owner / Partner",
    "CXO",
    "Vice President",
    "Director",
    "Experienced Manager",
    "Entry Level Manager",
    "Strategic",
    "Senior",
    "Entry Level",
    "In Training",
];

/// TLD suffixes stripped from company names extracted out of URLs/domains.
pub const DOMAIN_SUFFIXES: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "int", "io", "ai", "co", "uk", "de", "fr", "jp",
    "cn", "in", "br", "au", "ca", "mx", "es", "it", "nl", "se", "no", "dk", "fi", "pl", "ru",
    "kr", "sg", "hk", "tw", "th", "vn", "my", "id", "ph", "tr", "ae", "sa", "il", "za",
];

/// Mention synonyms used by the post-parse plausibility check: if a matched
/// industry (or any of its aliases here) does not appear in the original
/// query text, the match is flagged as likely model over-inference.
pub const INDUSTRY_MENTION_SYNONYMS: &[(&str, &[&str])] = &[
    ("financial services", &["fintech", "banking", "finance", "financial"]),
    ("artificial intelligence", &["ai", "machine learning", "ml"]),
    ("machine learning", &["ml", "ai"]),
    ("software development", &["saas", "software", "tech", "technology"]),
    ("healthcare", &["health", "medical", "pharma"]),
    ("manufacturing", &["manufacturing", "industrial", "production"]),
];

/// Department names accepted as `sub_filter` on department-scoped ranges.
pub const DEPARTMENTS: &[&str] = &[
    "Accounting",
    "Administrative",
    "Arts and Design",
    "Business Development",
    "Consulting",
    "Education",
    "Engineering",
    "Finance",
    "Healthcare Services",
    "Human Resources",
    "Information Technology",
    "Legal",
    "Marketing",
    "Media and Communication",
    "Operations",
    "Product Management",
    "Program and Project Management",
    "Purchasing",
    "Quality Assurance",
    "Real Estate",
    "Research",
    "Sales",
    "Customer Success and Support",
];
