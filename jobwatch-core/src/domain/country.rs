//! Country lookup
//!
//! Listing pages show a country display name; filters work on 2-letter codes.

/// Code assumed when a country cannot be resolved
pub const HOME_COUNTRY_CODE: &str = "BR";

/// Display name assumed when a listing shows no country
pub const HOME_COUNTRY_NAME: &str = "Brasil";

const COUNTRY_CODES: &[(&str, &str)] = &[
    ("brasil", "BR"),
    ("brazil", "BR"),
    ("argentina", "AR"),
    ("méxico", "MX"),
    ("mexico", "MX"),
    ("colombia", "CO"),
    ("colômbia", "CO"),
    ("chile", "CL"),
    ("españa", "ES"),
    ("spain", "ES"),
    ("espanha", "ES"),
    ("portugal", "PT"),
    ("estados unidos", "US"),
    ("united states", "US"),
];

/// Resolves a country display name to its 2-letter code
///
/// Matching is case-insensitive and ignores surrounding whitespace.
/// Unknown names resolve to [`HOME_COUNTRY_CODE`].
pub fn country_code(name: &str) -> &'static str {
    let key = name.trim().to_lowercase();
    COUNTRY_CODES
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, code)| *code)
        .unwrap_or(HOME_COUNTRY_CODE)
}
