// ---------------------------------------------------------------------------
// Fixed OOMMF column schema
// ---------------------------------------------------------------------------

/// Column names of an OOMMF data table, in file order.
pub const COLUMNS: [&str; 19] = [
    "Iteration",
    "Field Updates",
    "Sim Time",
    "Time Step",
    "Step Size",
    "Bx",
    "By",
    "Bz",
    "B",
    "|m x h|",
    "Mx/Ms",
    "My/Ms",
    "Mz/Ms",
    "Total Energy",
    "Exchange Energy",
    "Anisotropy Energy",
    "Demag Energy",
    "Zeeman Energy",
    "Max Angle",
];

pub const FIELD_COUNT: usize = COLUMNS.len();

pub const BX: usize = 5;
pub const BY: usize = 6;
pub const MX: usize = 10;
pub const MY: usize = 11;

// ---------------------------------------------------------------------------
// RawRecord – one solver iteration
// ---------------------------------------------------------------------------

/// One row of the table. The text tokens are kept verbatim so a CSV
/// re-export reproduces them byte for byte; the four columns the rotation
/// needs are also stored as floats.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub fields: Vec<String>,
    pub bx: f64,
    pub by: f64,
    pub mx: f64,
    pub my: f64,
}

impl RawRecord {
    /// Raw token for a named column.
    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = COLUMNS.iter().position(|c| *c == column)?;
        self.fields.get(idx).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// RawTable – the parsed file
// ---------------------------------------------------------------------------

/// All data rows of one `.odt` file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn bx(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.bx).collect()
    }

    pub fn by(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.by).collect()
    }
}

// ---------------------------------------------------------------------------
// RotatedFrame – magnetization in the field-aligned frame
// ---------------------------------------------------------------------------

/// Derived table, row-aligned with the [`RawTable`] it was built from.
/// Immutable once constructed; see [`crate::data::rotate::rotate`].
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedFrame {
    angle: i32,
    bx: Vec<f64>,
    by: Vec<f64>,
    field: Vec<f64>,
    m_longitudinal: Vec<f64>,
    m_transversal: Vec<f64>,
    field_from_by: bool,
}

impl RotatedFrame {
    pub(crate) fn new(
        angle: i32,
        bx: Vec<f64>,
        by: Vec<f64>,
        field: Vec<f64>,
        m_longitudinal: Vec<f64>,
        m_transversal: Vec<f64>,
        field_from_by: bool,
    ) -> Self {
        debug_assert!(
            [by.len(), field.len(), m_longitudinal.len(), m_transversal.len()]
                .iter()
                .all(|&n| n == bx.len())
        );
        Self {
            angle,
            bx,
            by,
            field,
            m_longitudinal,
            m_transversal,
            field_from_by,
        }
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Raw Bx column.
    pub fn bx(&self) -> &[f64] {
        &self.bx
    }

    /// Raw By column.
    pub fn by(&self) -> &[f64] {
        &self.by
    }

    /// Field axis after normalization (and the By swap, if it fired).
    pub fn field(&self) -> &[f64] {
        &self.field
    }

    pub fn m_longitudinal(&self) -> &[f64] {
        &self.m_longitudinal
    }

    pub fn m_transversal(&self) -> &[f64] {
        &self.m_transversal
    }

    /// Whether the field axis was replaced by the By column.
    pub fn field_from_by(&self) -> bool {
        self.field_from_by
    }

    pub fn len(&self) -> usize {
        self.bx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bx.is_empty()
    }

    /// `(field, M_long)` pairs for plotting.
    pub fn longitudinal_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.field.iter().copied().zip(self.m_longitudinal.iter().copied())
    }

    /// `(field, M_trans)` pairs for plotting.
    pub fn transversal_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.field.iter().copied().zip(self.m_transversal.iter().copied())
    }
}
