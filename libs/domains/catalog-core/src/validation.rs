use regex::Regex;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{ValidationError, ValidationErrors};

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static regex compiles"));

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("static regex compiles"));

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// `#RRGGBB`
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if HEX_COLOR.is_match(value) {
        Ok(())
    } else {
        Err(error(
            "hex_color",
            "Color must be a hex value like #6366F1",
        ))
    }
}

pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(error("non_negative", "Value must not be negative"))
    } else {
        Ok(())
    }
}

/// Prices are stored as `NUMERIC(12, 2)`.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound on a price's magnitude, `10^10`.
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Non-negative, at most two decimal places, below [`PRICE_LIMIT`].
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)?;
    if value.normalize().scale() > PRICE_SCALE {
        return Err(error(
            "price_scale",
            "Price must have at most 2 decimal places",
        ));
    }
    if value.abs() >= PRICE_LIMIT {
        return Err(error(
            "price_range",
            "Price must be less than 10000000000",
        ));
    }
    Ok(())
}

/// Lower-case alphanumerics separated by single hyphens.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if SLUG.is_match(value) {
        Ok(())
    } else {
        Err(error(
            "slug",
            "Slug must be lower-case letters and digits separated by single hyphens",
        ))
    }
}

/// Errors reported when a name yields an empty slug and none was supplied.
pub fn unsluggable_name() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(
        "name",
        error(
            "slug_source",
            "Name must contain at least one letter or digit to derive a slug",
        ),
    );
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_hex_color() {
        assert!(validate_hex_color("#6366F1").is_ok());
        assert!(validate_hex_color("#abcdef").is_ok());
        assert!(validate_hex_color("6366F1").is_err());
        assert!(validate_hex_color("#6366F").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(&dec!(0)).is_ok());
        assert!(validate_non_negative(&dec!(-0.00)).is_ok());
        assert!(validate_non_negative(&dec!(12.50)).is_ok());
        let err = validate_non_negative(&dec!(-0.01)).unwrap_err();
        assert_eq!(err.code, "non_negative");
    }

    #[test]
    fn test_price_limit_is_ten_billion() {
        assert_eq!(PRICE_LIMIT, dec!(10000000000));
    }

    #[test]
    fn test_price_scale() {
        assert!(validate_price(&dec!(9.99)).is_ok());
        assert!(validate_price(&dec!(9.500)).is_ok());
        assert_eq!(validate_price(&dec!(9.999)).unwrap_err().code, "price_scale");
        assert_eq!(validate_price(&dec!(-1.5)).unwrap_err().code, "non_negative");
    }

    #[test]
    fn test_price_magnitude() {
        assert!(validate_price(&dec!(9999999999.99)).is_ok());
        assert_eq!(
            validate_price(&dec!(10000000000)).unwrap_err().code,
            "price_range"
        );
        assert_eq!(
            validate_price(&dec!(123456789012.34)).unwrap_err().code,
            "price_range"
        );
    }

    #[test]
    fn test_slug_shape() {
        assert!(validate_slug("electronics").is_ok());
        assert!(validate_slug("usb-c-2m").is_ok());
        assert!(validate_slug("Electronics").is_err());
        assert!(validate_slug("-lead").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_unsluggable_name_targets_name_field() {
        let errors = unsluggable_name();
        let fields = errors.field_errors();
        let name_errors = fields.get("name").expect("name field reported");
        assert_eq!(name_errors[0].code, "slug_source");
    }
}
