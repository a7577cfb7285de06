use super::patterns::PatternSpec;

/// Selectors swept for call-to-action candidates
pub const CTA_SELECTORS: &[&str] = &[
    "button",
    "input[type='submit']",
    "input[type='button']",
    "a[href*='signup']",
    "a[href*='sign-up']",
    "a[href*='register']",
    "a[href*='get-started']",
    "a[href*='start']",
    "a[href*='trial']",
    "a[href*='demo']",
    "a[href*='pricing']",
    "a[href*='buy']",
    "a[href*='checkout']",
    "a[href*='cart']",
    "a[href*='subscribe']",
    "a[href*='join']",
    "a[href*='waitlist']",
    "a[href*='contact']",
    "a[href*='download']",
    "a[href*='book']",
    "[class*='cta']",
    "[class*='btn']",
    "[class*='button']",
    "[role='button']",
];

/// Longest text still considered a button label
pub const MAX_CTA_TEXT_LENGTH: usize = 60;

/// Verbs that mark text as an action rather than a name or brand
pub const ACTION_WORDS: &[&str] = &[
    "get", "start", "try", "join", "sign", "book", "buy", "shop", "subscribe", "download",
    "claim", "create", "register", "request", "order", "apply", "reserve", "schedule", "upgrade",
    "unlock", "grab", "save", "donate", "enroll", "install", "contact", "talk", "call", "chat",
    "learn", "discover", "explore", "see", "view", "watch", "read", "find", "submit", "continue",
    "go", "add", "send", "begin", "launch", "build", "play", "compare", "check", "access",
];

/// Offer nouns that mark short text as a CTA even without a verb
pub const OFFER_WORDS: &[&str] = &[
    "free", "trial", "demo", "quote", "consultation", "pricing", "plans", "waitlist", "account",
    "offer", "deal", "sale", "discount", "coupon", "estimate", "webinar", "tour", "sample",
    "checkout", "cart", "signup", "membership", "subscription", "appointment", "ebook",
];

/// Verbs that open a strong, outcome-driven CTA
pub const STRONG_ACTION_VERBS: &[&str] = &[
    "get", "start", "try", "join", "sign", "book", "buy", "shop", "subscribe", "download",
    "claim", "create", "register", "request", "order", "apply", "reserve", "schedule", "upgrade",
    "unlock", "grab", "save", "donate", "enroll", "install", "add",
];

/// Phrases classified as strong CTAs, lowercase
pub const STRONG_ACTION_PHRASES: &[&str] = &[
    "get started",
    "get started free",
    "start free trial",
    "start your free trial",
    "start now",
    "try for free",
    "try it free",
    "try free",
    "sign up",
    "sign up free",
    "join waitlist",
    "join the waitlist",
    "join now",
    "book a demo",
    "book a call",
    "request a demo",
    "request demo",
    "schedule a demo",
    "buy now",
    "shop now",
    "order now",
    "add to cart",
    "subscribe",
    "download now",
    "download free",
    "create account",
    "create free account",
    "claim offer",
    "get access",
    "get a quote",
    "apply now",
    "contact sales",
    "talk to sales",
    "upgrade now",
];

/// Phrases classified as weak CTAs, lowercase
pub const WEAK_ACTION_PHRASES: &[&str] = &[
    "learn more",
    "click here",
    "read more",
    "more info",
    "more information",
    "find out more",
    "see more",
    "view more",
    "details",
    "submit",
    "continue",
    "go",
    "here",
    "more",
    "ok",
];

/// Slider, pagination and widget controls that look like buttons
pub const DECORATIVE_PATTERNS: &[PatternSpec] = &[
    PatternSpec::ignore_case(
        r"^(?:prev(?:ious)?|next|back|close|menu|toggle|open|x|×|‹|›|«|»|<|>|←|→|\.{3}|…|•|·)$",
    ),
    PatternSpec::ignore_case(r"^(?:go to )?slide\s*\d+(?:\s*(?:of|/)\s*\d+)?$"),
    PatternSpec::ignore_case(r"^(?:page\s*)?\d+(?:\s*(?:of|/)\s*\d+)?$"),
    PatternSpec::ignore_case(r"^(?:previous|next)\s+(?:slide|page|item|image)$"),
    PatternSpec::ignore_case(r"^(?:play|pause|stop)(?:\s+(?:video|slideshow))?$"),
];

/// Explicit logo phrasing; rejects regardless of action words
pub const LOGO_PHRASE_PATTERNS: &[PatternSpec] = &[
    PatternSpec::ignore_case(r"\blogo\b"),
    PatternSpec::ignore_case(r"^(?:home|homepage)$"),
];

/// Brand-shaped text; rejected only when it carries no CTA vocabulary
pub const BRAND_PATTERNS: &[PatternSpec] = &[
    // Abbreviations such as IBM or AT&T
    PatternSpec::new(r"^[A-Z][A-Z0-9&]{1,5}$"),
    // CamelCase brands such as HubSpot
    PatternSpec::new(r"^[A-Z][a-z]+[A-Z][A-Za-z]*$"),
    // Single Title-Case word such as Stripe
    PatternSpec::new(r"^[A-Z][a-z]{2,}$"),
    // Bare domains
    PatternSpec::ignore_case(r"^[a-z0-9-]+\.(?:com|io|ai|co|app|dev|net|org)$"),
];

/// Person-name signatures; rejected only when they carry no CTA vocabulary
pub const PERSON_NAME_PATTERNS: &[PatternSpec] = &[
    PatternSpec::new(r"^[A-Z][a-z]+ [A-Z][a-z]+$"),
    PatternSpec::new(r"^[A-Z][a-z]+ [A-Z]\.$"),
    PatternSpec::new(r"^(?:Dr|Mr|Mrs|Ms|Prof)\.? [A-Z][a-z]+"),
    PatternSpec::new(
        r"^[A-Z][a-z]+ [A-Z][a-z]+,\s*(?:CEO|CTO|COO|CMO|VP|Founder|Co-founder|Director|Head|Manager)",
    ),
];
