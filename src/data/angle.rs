use super::error::ConvertError;

/// Suffixes that mark a file name as carrying the field angle.
const ANGLE_SUFFIXES: [&str; 2] = ["Grad.odt", "deg.odt"];

/// Angle (degrees) of the applied field, taken from the file name.
///
/// The identifier is split on `_`. When the last token is exactly `Grad.odt`
/// or `deg.odt`, the token before it must be a base-10 integer and is the
/// angle; otherwise the file carries no angle and 0 is returned. Only those
/// last two tokens are looked at, so `a_b_45_Grad.odt` gives 45.
pub fn extract_angle(identifier: &str) -> Result<i32, ConvertError> {
    let tokens: Vec<&str> = identifier.split('_').collect();
    let Some((last, rest)) = tokens.split_last() else {
        return Ok(0);
    };
    if !ANGLE_SUFFIXES.contains(last) {
        return Ok(0);
    }

    let token = rest.last().copied().unwrap_or_default();
    token.parse::<i32>().map_err(|_| ConvertError::AngleFormat {
        identifier: identifier.to_string(),
        token: token.to_string(),
    })
}
