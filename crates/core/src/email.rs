//! Canonical form for contact email addresses.

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];

const ICLOUD_DOMAINS: &[&str] = &["icloud.com", "me.com"];

const OUTLOOK_DOMAINS: &[&str] = &[
    "hotmail.at",
    "hotmail.be",
    "hotmail.ca",
    "hotmail.cl",
    "hotmail.co.il",
    "hotmail.co.nz",
    "hotmail.co.th",
    "hotmail.co.uk",
    "hotmail.com",
    "hotmail.com.ar",
    "hotmail.com.au",
    "hotmail.com.br",
    "hotmail.com.gr",
    "hotmail.com.mx",
    "hotmail.com.pe",
    "hotmail.com.tr",
    "hotmail.com.vn",
    "hotmail.cz",
    "hotmail.de",
    "hotmail.dk",
    "hotmail.es",
    "hotmail.fr",
    "hotmail.hu",
    "hotmail.id",
    "hotmail.ie",
    "hotmail.in",
    "hotmail.it",
    "hotmail.jp",
    "hotmail.kr",
    "hotmail.lv",
    "hotmail.my",
    "hotmail.ph",
    "hotmail.pt",
    "hotmail.sa",
    "hotmail.sg",
    "hotmail.sk",
    "live.be",
    "live.co.uk",
    "live.com",
    "live.com.ar",
    "live.com.mx",
    "live.de",
    "live.es",
    "live.eu",
    "live.fr",
    "live.it",
    "live.nl",
    "msn.com",
    "outlook.at",
    "outlook.be",
    "outlook.cl",
    "outlook.co.il",
    "outlook.co.nz",
    "outlook.co.th",
    "outlook.com",
    "outlook.com.ar",
    "outlook.com.au",
    "outlook.com.br",
    "outlook.com.gr",
    "outlook.com.pe",
    "outlook.com.tr",
    "outlook.com.vn",
    "outlook.cz",
    "outlook.de",
    "outlook.dk",
    "outlook.es",
    "outlook.fr",
    "outlook.hu",
    "outlook.id",
    "outlook.ie",
    "outlook.in",
    "outlook.it",
    "outlook.jp",
    "outlook.kr",
    "outlook.lv",
    "outlook.my",
    "outlook.ph",
    "outlook.pt",
    "outlook.sa",
    "outlook.sg",
    "outlook.sk",
    "passport.com",
];

const YAHOO_DOMAINS: &[&str] = &[
    "rocketmail.com",
    "yahoo.ca",
    "yahoo.co.uk",
    "yahoo.com",
    "yahoo.de",
    "yahoo.fr",
    "yahoo.in",
    "yahoo.it",
    "ymail.com",
];

const YANDEX_DOMAINS: &[&str] = &[
    "yandex.ru",
    "yandex.ua",
    "yandex.kz",
    "yandex.com",
    "yandex.by",
    "ya.ru",
];

/// Normalize an email address so equivalent spellings compare equal.
///
/// The whole address is lowercased. Provider-specific rules then drop
/// sub-address tags (`+tag`, or the last `-tag` for Yahoo) and, for Gmail,
/// the dots in the local part. Gmail and Yandex aliases collapse onto one
/// domain. Input without an `@` is only lowercased.
pub fn normalize_email(email: &str) -> String {
    let lowered = email.trim().to_lowercase();
    let Some((local, domain)) = lowered.rsplit_once('@') else {
        return lowered;
    };

    if listed(GMAIL_DOMAINS, domain) {
        let local = before_first(local, '+').replace('.', "");
        return format!("{local}@gmail.com");
    }
    if listed(YANDEX_DOMAINS, domain) {
        return format!("{local}@yandex.ru");
    }

    let local = if listed(OUTLOOK_DOMAINS, domain) || listed(ICLOUD_DOMAINS, domain) {
        before_first(local, '+')
    } else if listed(YAHOO_DOMAINS, domain) {
        local.rsplit_once('-').map_or(local, |(base, _)| base)
    } else {
        local
    };

    format!("{local}@{domain}")
}

fn listed(domains: &[&str], domain: &str) -> bool {
    domains.iter().any(|d| *d == domain)
}

fn before_first(local: &str, separator: char) -> &str {
    local
        .split_once(separator)
        .map_or(local, |(base, _)| base)
}
