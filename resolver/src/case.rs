//! Naming-convention conversion of flag keys.
//!
//! Word boundaries come from existing casing and punctuation; a key with no
//! boundaries is treated as one word. Conversion never fails.

use flag_alias_core::CaseStyle;
use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// Rewrites `key` in the given convention.
///
/// # Examples
///
/// ```
/// use flag_alias_core::CaseStyle;
/// use flag_alias_resolver::case::convert;
///
/// assert_eq!(convert("my-flag-key", CaseStyle::LowerCamel), "myFlagKey");
/// assert_eq!(convert("my-flag-key", CaseStyle::UpperCamel), "MyFlagKey");
/// assert_eq!(convert("myFlagKey", CaseStyle::ScreamingSnake), "MY_FLAG_KEY");
/// assert_eq!(convert("my_flag_key", CaseStyle::Kebab), "my-flag-key");
/// assert_eq!(convert("MyFlagKey", CaseStyle::Dot), "my.flag.key");
/// ```
pub fn convert(key: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::LowerCamel => key.to_lower_camel_case(),
        CaseStyle::UpperCamel => key.to_upper_camel_case(),
        CaseStyle::Snake => key.to_snake_case(),
        CaseStyle::ScreamingSnake => key.to_shouty_snake_case(),
        CaseStyle::Kebab => key.to_kebab_case(),
        CaseStyle::Dot => to_dot_case(key),
    }
}

/// Snake-case words joined with `.`.
fn to_dot_case(key: &str) -> String {
    key.to_snake_case().replace('_', ".")
}
