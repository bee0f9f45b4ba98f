use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use super::EntityLabel;


const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("am", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("made", "make"),
    ("went", "go"),
    ("gone", "go"),
    ("spent", "spend"),
    ("shown", "show"),
    ("saw", "see"),
    ("seen", "see"),
    ("took", "take"),
    ("taken", "take"),
    ("led", "lead"),
    ("brought", "bring"),
    ("became", "become"),
    ("began", "begin"),
    ("begun", "begin"),
    ("bought", "buy"),
    ("sold", "sell"),
    ("paid", "pay"),
    ("lost", "lose"),
    ("won", "win"),
    ("held", "hold"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("split", "split"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
];


const BASE_WORDS: &[&str] = &[
    // change over time
    "increase", "decline", "growth", "rise", "drop", "trend", "fall", "reduce", "expansion",
    "fluctuation", "progression", "evolution", "trajectory", "change", "variation", "shift",
    "movement", "improve", "worsen", "spike", "plunge", "surge", "peak", "valley", "grow",
    "decrease", "double", "triple",
    // relations
    "prefer", "dominate", "compare", "majority", "minority", "correlation", "causation",
    "influence", "impact", "affect", "connection", "network", "interaction", "collaboration",
    "flow", "transfer", "relation", "mapping", "connect", "link", "association", "interact",
    "depend",
    // structure
    "structure", "hierarchy", "parent", "child", "tree", "branch", "root", "descendant",
    "ancestor", "organization", "breakdown", "composition", "level", "tier", "layer",
    "subordinate", "category", "subcategory", "classification", "taxonomy", "class", "subclass",
    "group", "subgroup", "contain",
    // parts of a whole
    "percentage", "proportion", "fraction", "share", "allocation", "distribution", "segment",
    "portion", "division", "makeup", "constituent", "ratio", "percent", "split", "part", "piece",
    "section", "component", "pie", "slice", "partition", "comprise", "consist", "account",
    "represent", "divide", "constitute",
    // comparison
    "contrast", "difference", "similarity", "benchmark", "outperform", "underperform", "rank",
    "exceed", "comparison",
    // time
    "time", "date", "year", "month", "week", "day", "hour", "minute", "period", "timeline",
    "duration", "interval", "frequency", "schedule", "quarter", "decade", "season",
    // spread and flow
    "spread", "range", "variance", "outlier", "cluster", "process", "workflow", "step",
    "sequence", "procedure", "pipeline", "stage",
    // general
    "be", "have", "do", "make", "go", "take", "see", "show", "display", "visualize", "use", "get",
    "give", "need", "want", "include", "report", "earn", "cost", "price", "value", "number",
    "total", "vary", "measure", "remain", "reach", "lead", "follow", "explain", "describe",
    "spend", "revenue", "sale", "market", "region", "country", "city", "location", "customer",
    "user", "product", "department", "employee", "team", "company", "budget", "expense",
    "profit", "loss", "result", "point", "item", "list", "word", "topic", "theme", "term",
    "mention", "occur", "appear", "count", "state", "area", "map", "chart", "graph", "plot",
    "record", "track", "estimate", "expect", "project", "forecast", "rate", "unit", "order",
    "service", "source", "target", "node", "edge", "route", "trade", "export", "import",
    "voter", "vote", "demographic", "allocate", "invest", "investment", "fund", "income",
    "population", "student", "school", "hospital", "patient", "case", "event", "task",
    "like", "love", "work", "move", "start", "end", "open", "close", "create", "build",
];


const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion", "dozen",
];


/// Upper-case tokens that look like acronyms but are not organisations.
const NON_ORG_ACRONYMS: &[&str] = &[
    "CEO", "CFO", "CTO", "COO", "CMO", "VP", "GDP", "GNP", "CPI", "USD", "EUR", "GBP", "JPY",
    "CNY", "KPI", "ROI", "API", "PDF", "CSV", "AI", "ML", "IT", "HR", "PR", "OK", "FAQ", "DAG",
    "TV", "PC", "ID", "VS", "AM", "PM", "QA", "UI", "UX", "SQL", "JSON", "HTML", "XML", "NLP",
    "YOY", "YTD", "QOQ", "MOM", "CAGR", "EPS", "ETF", "IPO", "II", "III", "IV", "VI", "VII",
    "VIII", "IX", "XI", "XII", "RAM", "CPU", "GPU", "SSD", "USB", "FYI", "ASAP", "TBD", "NA",
    "N/A", "AND", "OR", "NOT", "THE", "FOR", "TOTAL", "NOTE",
];


const GPE_NAMES: &[&str] = &[
    // countries
    "United States", "United States of America", "USA", "US", "U.S.", "America", "Canada",
    "Mexico", "Brazil", "Argentina", "Chile", "Colombia", "Peru", "Venezuela", "United Kingdom",
    "UK", "Britain", "Great Britain", "England", "Scotland", "Wales", "Ireland", "France",
    "Germany", "Italy", "Spain", "Portugal", "Netherlands", "Belgium", "Switzerland", "Austria",
    "Sweden", "Norway", "Denmark", "Finland", "Iceland", "Poland", "Ukraine", "Russia",
    "Greece", "Turkey", "Israel", "Egypt", "Saudi Arabia", "UAE", "United Arab Emirates",
    "Qatar", "Iran", "Iraq", "India", "Pakistan", "Bangladesh", "China", "Japan", "South Korea",
    "North Korea", "Korea", "Taiwan", "Vietnam", "Thailand", "Indonesia", "Malaysia",
    "Singapore", "Philippines", "Australia", "New Zealand", "South Africa", "Nigeria", "Kenya",
    "Ethiopia", "Ghana", "Morocco", "Czech Republic", "Hungary", "Romania",
    // cities
    "New York", "New York City", "Los Angeles", "San Francisco", "Chicago", "Houston",
    "Seattle", "Boston", "Miami", "Atlanta", "Dallas", "Denver", "Austin", "Washington",
    "Philadelphia", "San Diego", "Toronto", "Vancouver", "Montreal", "London", "Paris",
    "Berlin", "Madrid", "Rome", "Milan", "Amsterdam", "Brussels", "Vienna", "Zurich",
    "Stockholm", "Oslo", "Copenhagen", "Dublin", "Lisbon", "Prague", "Warsaw", "Moscow",
    "Istanbul", "Dubai", "Cairo", "Lagos", "Nairobi", "Johannesburg", "Mumbai", "Delhi",
    "New Delhi", "Bangalore", "Beijing", "Shanghai", "Shenzhen", "Hong Kong", "Tokyo", "Osaka",
    "Seoul", "Bangkok", "Jakarta", "Manila", "Sydney", "Melbourne", "Auckland", "Mexico City",
    "Sao Paulo", "São Paulo", "Rio de Janeiro", "Buenos Aires", "Lima", "Bogota",
    // states and provinces
    "California", "Texas", "Florida", "Ohio", "Michigan", "Illinois", "Pennsylvania",
    "Massachusetts", "Arizona", "Nevada", "Oregon", "Colorado", "Virginia", "North Carolina",
    "South Carolina", "Georgia", "New Jersey", "Minnesota", "Wisconsin", "Tennessee", "Ontario",
    "Quebec", "British Columbia", "Alberta", "Bavaria",
];


const LOC_NAMES: &[&str] = &[
    "Europe", "Asia", "Africa", "North America", "South America", "Latin America",
    "Central America", "Oceania", "Antarctica", "Middle East", "Southeast Asia", "East Asia",
    "South Asia", "Central Asia", "Western Europe", "Eastern Europe", "Scandinavia",
    "Caribbean", "Pacific", "Atlantic", "Mediterranean", "Sahara", "Arctic", "Himalayas",
    "Alps", "Balkans", "Siberia", "Silicon Valley", "Midwest", "West Coast", "East Coast",
    "New England", "Pacific Northwest", "Sub-Saharan Africa", "Asia Pacific", "EMEA", "APAC",
];


const ORG_NAMES: &[&str] = &[
    "Google", "Alphabet", "Apple", "Microsoft", "Amazon", "Meta", "Facebook", "Tesla",
    "Netflix", "IBM", "Intel", "AMD", "Nvidia", "NVIDIA", "Samsung", "Toyota", "Walmart",
    "Nike", "Adidas", "Coca-Cola", "PepsiCo", "Pepsi", "NASA", "FBI", "CIA", "UN", "NATO",
    "WHO", "IMF", "World Bank", "European Union", "EU", "OpenAI", "Oracle", "Salesforce",
    "Twitter", "Uber", "Airbnb", "Spotify", "Disney", "Boeing", "Airbus", "Ford", "BMW",
    "Honda", "Sony", "Starbucks", "McDonald's", "Visa", "Mastercard", "PayPal", "Alibaba",
    "Tencent", "Huawei", "Shopify", "LinkedIn", "YouTube", "Instagram", "TikTok", "Reddit",
    "Congress", "Senate", "Parliament", "Federal Reserve",
];


const PRODUCT_NAMES: &[&str] = &[
    "iPhone", "iPad", "MacBook", "iMac", "Windows", "Android", "Xbox", "PlayStation",
    "Nintendo Switch", "Kindle", "Alexa", "ChatGPT", "Excel", "PowerPoint", "Photoshop",
    "Prius", "Model 3", "Model S", "Model Y", "Galaxy", "Pixel", "Chrome", "Firefox", "Safari",
    "Slack", "Zoom", "Tableau",
];


const EVENT_NAMES: &[&str] = &[
    "World War I", "World War II", "World War One", "World War Two", "Olympics",
    "Summer Olympics", "Winter Olympics", "World Cup", "Super Bowl", "Great Depression",
    "Great Recession", "Black Friday", "Cyber Monday", "Brexit", "Cold War",
    "Industrial Revolution", "Financial Crisis", "Christmas", "Thanksgiving",
];


lazy_static! {
    pub(super) static ref IRREGULAR_LEMMAS: HashMap<&'static str, &'static str> =
        IRREGULAR_FORMS.iter().copied().collect();

    pub(super) static ref BASE_LEMMAS: HashSet<&'static str> =
        BASE_WORDS.iter().copied().collect();

    pub(super) static ref NUMBER_LEMMAS: HashSet<&'static str> =
        NUMBER_WORDS.iter().copied().collect();

    pub(super) static ref ACRONYM_STOPLIST: HashSet<&'static str> =
        NON_ORG_ACRONYMS.iter().copied().collect();
}


/// Built-in gazetteer as `(label, phrase)` pairs.
pub(super) fn builtin_gazetteer() -> Vec<(EntityLabel, String)> {
    let groups: [(EntityLabel, &[&str]); 5] = [
        (EntityLabel::Gpe, GPE_NAMES),
        (EntityLabel::Loc, LOC_NAMES),
        (EntityLabel::Org, ORG_NAMES),
        (EntityLabel::Product, PRODUCT_NAMES),
        (EntityLabel::Event, EVENT_NAMES),
    ];

    groups
        .iter()
        .flat_map(|(label, names)| names.iter().map(move |name| (*label, name.to_string())))
        .collect()
}


/// Lemma of a single word: irregular table, then suffix stripping against
/// the known base forms, else the lowercased word itself.
pub(super) fn lemmatize(word: &str) -> String {
    let lower = word.to_lowercase();
    if !lower.chars().all(char::is_alphabetic) {
        return lower;
    }
    if let Some(lemma) = IRREGULAR_LEMMAS.get(lower.as_str()) {
        return (*lemma).to_string();
    }
    if BASE_LEMMAS.contains(lower.as_str()) {
        return lower;
    }

    for candidate in suffix_candidates(&lower) {
        if BASE_LEMMAS.contains(candidate.as_str()) {
            return candidate;
        }
    }
    lower
}

fn suffix_candidates(word: &str) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(stem) = word.strip_suffix("ies") {
        out.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("ied") {
        out.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("es") {
        out.push(stem.to_string());
        out.push(format!("{stem}e"));
    }
    if !word.ends_with("ss") {
        if let Some(stem) = word.strip_suffix('s') {
            out.push(stem.to_string());
        }
    }
    if let Some(stem) = word.strip_suffix("ed") {
        push_verb_stems(&mut out, stem);
    }
    if let Some(stem) = word.strip_suffix("ing") {
        push_verb_stems(&mut out, stem);
    }

    out
}

fn push_verb_stems(out: &mut Vec<String>, stem: &str) {
    out.push(stem.to_string());
    out.push(format!("{stem}e"));

    // dropped -> drop, planning -> plan
    let mut chars = stem.chars().rev();
    if let (Some(last), Some(prev)) = (chars.next(), chars.next()) {
        if last == prev {
            let mut undoubled = stem.to_string();
            undoubled.pop();
            out.push(undoubled);
        }
    }
}


pub(super) fn is_number_word(word: &str) -> bool {
    NUMBER_LEMMAS.contains(word.to_lowercase().as_str())
}
