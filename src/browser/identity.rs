//! User-agent sniffing rules
//!
//! Identity is decided by walking a fixed, ordered rule list; the first
//! matching rule wins. Order is significant: several patterns are substrings
//! of user agents that belong to later rules (every Edge user agent also
//! says "Chrome", most user agents say "Safari"). Resolution never fails;
//! when nothing matches, the fallback extracts a generic `name/version`
//! token pair and unknown fields stay empty.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse identity of the embedding browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserIdentity {
    /// Human-readable name, e.g. "Chrome"
    pub name: String,
    /// Lowercase identifier, e.g. "chrome"
    #[serde(rename = "type")]
    pub kind: String,
    /// Major[.minor] version, empty when unknown
    pub version: String,
}

static OPERA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)opera|opr").unwrap());
static OPERA_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:opera|opr)[\s/](\d+(?:\.\d+)?)").unwrap());
static MSIE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)msie|trident").unwrap());
static MSIE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:msie |rv:)(\d+(?:\.\d+)?)").unwrap());
static EDGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)chrome.+? edge").unwrap());
static EDGE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)edge/(\d+(?:\.\d+)?)").unwrap());
static CHROME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)chrome|crios|crmo").unwrap());
static CHROME_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:chrome|crios|crmo)/(\d+(?:\.\d+)?)").unwrap());
static FIREFOX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)firefox").unwrap());
static FIREFOX_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)firefox[ /](\d+(?:\.\d+)?)").unwrap());
static ANDROID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)android").unwrap());
static LIKE_ANDROID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)like android").unwrap());
static SAFARI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)safari").unwrap());
static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)version/(\d+(?:\.\d+)?)").unwrap());
static GENERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*)/(.*) ").unwrap());

/// One sniffing rule: predicate, labels, version extractor
struct Rule {
    name: &'static str,
    kind: &'static str,
    applies: fn(&str) -> bool,
    version: fn(&str) -> String,
}

/// Rules in priority order; evaluation stops at the first match.
static RULES: &[Rule] = &[
    Rule {
        name: "Opera",
        kind: "opera",
        applies: |ua| OPERA.is_match(ua),
        version: |ua| {
            let version = first_match(&VERSION_TOKEN, ua);
            if version.is_empty() {
                first_match(&OPERA_VERSION, ua)
            } else {
                version
            }
        },
    },
    Rule {
        name: "Internet Explorer",
        kind: "msie",
        applies: |ua| MSIE.is_match(ua),
        version: |ua| first_match(&MSIE_VERSION, ua),
    },
    Rule {
        name: "Microsoft Edge",
        kind: "msedge",
        applies: |ua| EDGE.is_match(ua),
        version: |ua| first_match(&EDGE_VERSION, ua),
    },
    Rule {
        name: "Chrome",
        kind: "chrome",
        applies: |ua| CHROME.is_match(ua),
        version: |ua| first_match(&CHROME_VERSION, ua),
    },
    Rule {
        name: "Firefox",
        kind: "firefox",
        applies: |ua| FIREFOX.is_match(ua),
        version: |ua| first_match(&FIREFOX_VERSION, ua),
    },
    Rule {
        name: "Android",
        kind: "android",
        // "like Android" shows up in user agents that are not Android at all.
        applies: |ua| !LIKE_ANDROID.is_match(ua) && ANDROID.is_match(ua),
        version: |ua| first_match(&VERSION_TOKEN, ua),
    },
    Rule {
        name: "Safari",
        kind: "safari",
        applies: |ua| SAFARI.is_match(ua),
        version: |ua| first_match(&VERSION_TOKEN, ua),
    },
];

fn first_match(re: &Regex, ua: &str) -> String {
    re.captures(ua)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn second_match(re: &Regex, ua: &str) -> String {
    re.captures(ua)
        .and_then(|captures| captures.get(2))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Resolve a raw user-agent string into a [`BrowserIdentity`].
///
/// The input is opaque and untrusted; absence of data yields empty fields,
/// never an error.
pub fn resolve(user_agent: &str) -> BrowserIdentity {
    for rule in RULES {
        if (rule.applies)(user_agent) {
            return BrowserIdentity {
                name: rule.name.to_string(),
                kind: rule.kind.to_string(),
                version: (rule.version)(user_agent),
            };
        }
    }

    // Fallback: a generic "name/version" token pair from the head of the
    // string, with the identifier derived from the name.
    let name = first_match(&GENERIC_TOKEN, user_agent);
    let version = second_match(&GENERIC_TOKEN, user_agent);
    let kind = name.to_lowercase().replace(' ', "");
    BrowserIdentity {
        name,
        kind,
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const FIREFOX_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:115.0) Gecko/20100101 Firefox/115.0";
    const EDGE_UA: &str = "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/42.0.2311.135 Safari/537.36 Edge/12.10240";
    const SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15";
    const OPERA_UA: &str =
        "Opera/9.80 (Windows NT 6.0) Presto/2.12.388 Version/12.14";
    const OPR_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/106.0.0.0 Safari/537.36 OPR/92.0.4561.21";
    const IE11_UA: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64; Trident/7.0; rv:11.0) like Gecko";
    const ANDROID_UA: &str = "Mozilla/5.0 (Linux; U; Android 4.0.3; en-us; GT-I9100 Build/IML74K) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";

    #[test]
    fn test_resolves_chrome() {
        let identity = resolve(CHROME_UA);
        assert_eq!(identity.name, "Chrome");
        assert_eq!(identity.kind, "chrome");
        assert_eq!(identity.version, "120.0");
    }

    #[test]
    fn test_resolves_firefox() {
        let identity = resolve(FIREFOX_UA);
        assert_eq!(identity.name, "Firefox");
        assert_eq!(identity.kind, "firefox");
        assert_eq!(identity.version, "115.0");
    }

    #[test]
    fn test_edge_wins_over_chrome() {
        // Edge user agents also advertise Chrome and Safari; rule order
        // decides.
        let identity = resolve(EDGE_UA);
        assert_eq!(identity.name, "Microsoft Edge");
        assert_eq!(identity.version, "12.10240");
    }

    #[test]
    fn test_chrome_wins_over_safari() {
        assert_eq!(resolve(CHROME_UA).name, "Chrome");
        assert_eq!(resolve(SAFARI_UA).name, "Safari");
        assert_eq!(resolve(SAFARI_UA).version, "17.1");
    }

    #[test]
    fn test_resolves_opera_presto_and_blink() {
        let presto = resolve(OPERA_UA);
        assert_eq!(presto.name, "Opera");
        assert_eq!(presto.version, "12.14");

        // Blink Opera has no Version/ token; the opr/ token is the fallback.
        let blink = resolve(OPR_UA);
        assert_eq!(blink.name, "Opera");
        assert_eq!(blink.version, "92.0");
    }

    #[test]
    fn test_resolves_internet_explorer() {
        let identity = resolve(IE11_UA);
        assert_eq!(identity.name, "Internet Explorer");
        assert_eq!(identity.kind, "msie");
        assert_eq!(identity.version, "11.0");
    }

    #[test]
    fn test_resolves_android_stock_browser() {
        let identity = resolve(ANDROID_UA);
        assert_eq!(identity.name, "Android");
        assert_eq!(identity.version, "4.0");
    }

    #[test]
    fn test_like_android_is_not_android() {
        let identity = resolve("SomeShell (like Android) Version/2.2 Safari/100.1");
        assert_eq!(identity.name, "Safari");
    }

    #[test]
    fn test_fallback_token_pair() {
        let identity = resolve("botagent/1.2 experimental");
        assert_eq!(identity.name, "botagent");
        assert_eq!(identity.kind, "botagent");
        assert_eq!(identity.version, "1.2");
    }

    #[test]
    fn test_unrecognized_yields_empty_fields() {
        let identity = resolve("");
        assert_eq!(identity, BrowserIdentity::default());

        let identity = resolve("no token pair here");
        assert!(identity.name.is_empty());
        assert!(identity.version.is_empty());
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let value = serde_json::to_value(resolve(CHROME_UA)).unwrap();
        assert_eq!(value["type"], "chrome");
    }
}
