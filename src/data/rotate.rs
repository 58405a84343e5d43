use super::error::ConvertError;
use super::model::{RawTable, RotatedFrame};

/// Below this `|cos θ|` the field normalization is treated as undefined.
pub const COS_EPSILON: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Magnetization rotation
// ---------------------------------------------------------------------------

/// Rotate in-plane magnetization `(Mx/Ms, My/Ms)` into the frame of a field
/// applied at `angle` degrees. Returns `(M_long, M_trans)`, both negated to
/// match the sign of the field axis.
pub fn rotate_magnetization(mx: f64, my: f64, angle: i32) -> (f64, f64) {
    let (sin, cos) = f64::from(angle).to_radians().sin_cos();
    let m_long = -mx * cos - my * sin;
    let m_trans = -mx * sin + my * cos;
    (m_long, m_trans)
}

// ---------------------------------------------------------------------------
// Field axis
// ---------------------------------------------------------------------------

/// Field values for the x axis of the hysteresis plot.
///
/// Unless the angle is exactly 0 or 180, Bx is projected onto the field
/// direction by dividing by `-cos θ`. Afterwards, if the first value
/// truncates to 0 the sweep is assumed to run along y and `by` is returned
/// unchanged. The flag in the result says whether that swap happened.
pub fn field_axis(bx: &[f64], by: &[f64], angle: i32) -> Result<(Vec<f64>, bool), ConvertError> {
    let field = if angle == 0 || angle == 180 {
        bx.to_vec()
    } else {
        let divisor = -f64::from(angle).to_radians().cos();
        if divisor.abs() < COS_EPSILON {
            return Err(ConvertError::NumericDomain {
                angle,
                row: 0,
                divisor,
            });
        }
        bx.iter()
            .enumerate()
            .map(|(row, &b)| {
                let v = b / divisor;
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(ConvertError::NumericDomain {
                        angle,
                        row,
                        divisor,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    // Only the first row decides.
    match field.first() {
        Some(first) if first.trunc() == 0.0 => Ok((by.to_vec(), true)),
        _ => Ok((field, false)),
    }
}

// ---------------------------------------------------------------------------
// Full transform
// ---------------------------------------------------------------------------

/// Build the field-aligned frame for one parsed table.
pub fn rotate(table: &RawTable, angle: i32) -> Result<RotatedFrame, ConvertError> {
    let bx = table.bx();
    let by = table.by();

    let (m_longitudinal, m_transversal): (Vec<f64>, Vec<f64>) = table
        .records
        .iter()
        .map(|r| rotate_magnetization(r.mx, r.my, angle))
        .unzip();

    let (field, field_from_by) = field_axis(&bx, &by, angle)?;

    log::debug!(
        "rotated {} rows at {angle}°{}",
        table.len(),
        if field_from_by { ", field axis taken from By" } else { "" }
    );

    Ok(RotatedFrame::new(
        angle,
        bx,
        by,
        field,
        m_longitudinal,
        m_transversal,
        field_from_by,
    ))
}
