use super::patterns::PatternSpec;
use pagelens_core::snapshot::{SelectorGroup, SocialProofType};

pub const SELECTOR_GROUPS: &[SelectorGroup] = &[
    SelectorGroup {
        kind: SocialProofType::Testimonial,
        selectors: &[
            "[class*='testimonial']",
            "[class*='quote']",
            "blockquote",
            "[data-testimonial]",
            "[class*='customer-story']",
        ],
    },
    SelectorGroup {
        kind: SocialProofType::Review,
        selectors: &[
            "[class*='review']",
            "[class*='rating']",
            "[itemprop='review']",
            "[itemtype*='Review']",
            "[class*='stars']",
        ],
    },
    SelectorGroup {
        kind: SocialProofType::TrustBadge,
        selectors: &[
            "[class*='trust']",
            "[class*='badge']",
            "[class*='certified']",
            "[class*='security']",
            "[class*='guarantee']",
            "img[alt*='certified' i]",
        ],
    },
    SelectorGroup {
        kind: SocialProofType::CustomerCount,
        selectors: &[
            "[class*='stat']",
            "[class*='counter']",
            "[class*='metric']",
            "[class*='number']",
            "[class*='count']",
        ],
    },
    SelectorGroup {
        kind: SocialProofType::SocialMedia,
        selectors: &[
            "[class*='social-proof']",
            "[class*='followers']",
            "[class*='tweet']",
            "[class*='twitter-embed']",
        ],
    },
    SelectorGroup {
        kind: SocialProofType::Partnership,
        selectors: &[
            "[class*='partner']",
            "[class*='client']",
            "[class*='logo-wall']",
            "[class*='logos']",
            "[class*='trusted-by']",
            "[class*='customers']",
        ],
    },
    SelectorGroup {
        kind: SocialProofType::CaseStudy,
        selectors: &[
            "[class*='case-study']",
            "[class*='case-studies']",
            "[class*='success-story']",
            "a[href*='case-stud']",
        ],
    },
    SelectorGroup {
        kind: SocialProofType::NewsMention,
        selectors: &[
            "[class*='press']",
            "[class*='featured-in']",
            "[class*='as-seen']",
            "[class*='media-mention']",
            "[class*='in-the-news']",
        ],
    },
];

/// Class-name keywords that back up a selector hit, per type
pub fn class_keywords(kind: SocialProofType) -> &'static [&'static str] {
    match kind {
        SocialProofType::Testimonial => &["testimonial", "quote", "customer-story", "blockquote"],
        SocialProofType::Review => &["review", "rating", "stars"],
        SocialProofType::TrustBadge => &["trust", "badge", "certified", "security", "guarantee"],
        SocialProofType::CustomerCount => &["stat", "counter", "metric", "number", "count"],
        SocialProofType::SocialMedia => &["social", "followers", "tweet", "twitter"],
        SocialProofType::Partnership => &["partner", "client", "logo", "trusted", "customers"],
        SocialProofType::CaseStudy => &["case-stud", "success-story"],
        SocialProofType::NewsMention => &["press", "featured", "as-seen", "media", "news"],
    }
}

/// Text signatures that back up a selector hit, per type
pub fn text_patterns(kind: SocialProofType) -> &'static [PatternSpec] {
    match kind {
        SocialProofType::Testimonial => TESTIMONIAL_TEXT,
        SocialProofType::Review => REVIEW_TEXT,
        SocialProofType::TrustBadge => TRUST_BADGE_TEXT,
        SocialProofType::CustomerCount => CUSTOMER_COUNT_TEXT,
        SocialProofType::SocialMedia => SOCIAL_MEDIA_TEXT,
        SocialProofType::Partnership => PARTNERSHIP_TEXT,
        SocialProofType::CaseStudy => CASE_STUDY_TEXT,
        SocialProofType::NewsMention => NEWS_MENTION_TEXT,
    }
}

/// Types whose candidates need a rating element in or next to them
pub fn requires_rating_indicator(kind: SocialProofType) -> bool {
    matches!(kind, SocialProofType::Review)
}

/// Types whose valid phrasing often trips the boilerplate denylist
pub fn bypasses_boilerplate_filter(kind: SocialProofType) -> bool {
    matches!(
        kind,
        SocialProofType::Partnership | SocialProofType::NewsMention
    )
}

const TESTIMONIAL_TEXT: &[PatternSpec] = &[
    PatternSpec::new(r#"["“”]"#),
    PatternSpec::ignore_case(r"\b(?:I|we)\s+(?:love|loved|recommend|use|switched)\b"),
    PatternSpec::new(r"(?m)^\s*[-–—]\s*[A-Z][a-z]+"),
    PatternSpec::ignore_case(r"\b(?:CEO|CTO|founder|director|manager|head of)\b"),
];

const REVIEW_TEXT: &[PatternSpec] = &[
    PatternSpec::new(r"[★⭐]"),
    PatternSpec::ignore_case(r"\b[1-5](?:\.\d)?\s*(?:/\s*5|out of 5|stars?)\b"),
    PatternSpec::ignore_case(r"\b\d[\d,.]*\s+(?:reviews|ratings)\b"),
    PatternSpec::ignore_case(r"\brated\b"),
];

const TRUST_BADGE_TEXT: &[PatternSpec] = &[
    PatternSpec::ignore_case(r"\b(?:SOC\s?2|ISO\s?27001|GDPR|HIPAA|PCI(?:[-\s]DSS)?|CCPA)\b"),
    PatternSpec::ignore_case(r"\b(?:certified|verified|secure[ds]?|encrypted|compliant)\b"),
    PatternSpec::ignore_case(r"\b(?:money[-\s]back|guarantee[d]?|ssl)\b"),
];

const CUSTOMER_COUNT_TEXT: &[PatternSpec] = &[
    PatternSpec::ignore_case(
        r"\b\d[\d,.]*\s*[kKmM+]*\+?\s+(?:customers|users|companies|teams|businesses|developers|people|downloads|installs)\b",
    ),
    PatternSpec::ignore_case(r"\b(?:trusted|used|loved)\s+by\s+(?:over\s+)?\d"),
];

const SOCIAL_MEDIA_TEXT: &[PatternSpec] = &[
    PatternSpec::ignore_case(r"\b\d[\d,.]*\s*[kKmM]?\+?\s+(?:followers|likes|stars on github|subscribers)\b"),
    PatternSpec::ignore_case(r"(?:^|\s)@[a-z0-9_]{2,}"),
];

const PARTNERSHIP_TEXT: &[PatternSpec] = &[
    PatternSpec::ignore_case(r"\b(?:trusted by|partners?|our clients|customers include|used by|backed by)\b"),
    PatternSpec::ignore_case(r"\b(?:official|certified|premier)\s+partner\b"),
];

const CASE_STUDY_TEXT: &[PatternSpec] = &[
    PatternSpec::ignore_case(r"\bcase stud(?:y|ies)\b"),
    PatternSpec::ignore_case(r"\bsuccess stor(?:y|ies)\b"),
    PatternSpec::ignore_case(r"\b(?:increased|reduced|grew|saved)\b.*\d+\s*%"),
];

const NEWS_MENTION_TEXT: &[PatternSpec] = &[
    PatternSpec::ignore_case(r"\b(?:as seen (?:in|on)|featured (?:in|on)|in the press|press)\b"),
    PatternSpec::ignore_case(
        r"\b(?:TechCrunch|Forbes|Wired|The Verge|New York Times|Bloomberg|Reuters|Fast Company)\b",
    ),
];

/// Leading text of navigation, footer and marketing boilerplate, lowercase
pub const GENERIC_PREFIXES: &[&str] = &[
    "home",
    "menu",
    "about us",
    "contact us",
    "privacy",
    "terms",
    "cookie",
    "copyright",
    "©",
    "all rights reserved",
    "sign in",
    "log in",
    "login",
    "subscribe to",
    "follow us",
    "skip to",
    "back to top",
    "learn more",
    "read more",
    "view all",
    "see all",
];

/// Words that mark a candidate as boilerplate wherever they appear, lowercase
pub const GENERIC_KEYWORDS: &[&str] = &[
    "cookie policy",
    "privacy policy",
    "terms of service",
    "terms and conditions",
    "all rights reserved",
    "newsletter",
    "unsubscribe",
    "javascript",
    "loading...",
    "accept cookies",
    "navigation",
];

pub const GENERIC_GLYPHS: &[char] = &[
    '→', '←', '↑', '↓', '›', '‹', '»', '«', '▸', '▾', '☰', '✕', '×', '🍪', '👉', '👇', '🚀', '🔥', '✨',
];

/// Words carried by genuine customer praise, lowercase
pub const POSITIVE_SENTIMENT: &[&str] = &[
    "amazing",
    "love",
    "loved",
    "great",
    "excellent",
    "fantastic",
    "awesome",
    "incredible",
    "outstanding",
    "recommend",
    "best",
    "game changer",
    "game-changer",
    "helpful",
    "easy to use",
    "saved us",
    "saved me",
    "changed",
    "transformed",
    "impressed",
    "happy",
    "delighted",
    "wonderful",
    "brilliant",
    "perfect",
];

/// Self-referential words that mark text as the site's own copy, lowercase
pub const NEGATIVE_PREFIX: &[&str] = &["we", "we're", "our", "build", "building"];

/// Characters scanned before a sentiment keyword for a negative prefix
pub const NEGATIVE_PREFIX_WINDOW: usize = 80;

pub const TESTIMONIAL_MIN_LENGTH: usize = 30;
pub const TESTIMONIAL_MAX_LENGTH: usize = 300;
