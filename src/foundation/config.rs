use crate::foundation::error::{MasonryError, MasonryResult};

/// Grid configuration accepted at the session boundary.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns, at least 1.
    pub columns: usize,
    /// Spacing unit added above every item in a column.
    pub gutter: f64,
    /// Externally forced layout width; the measured container width wins when larger.
    pub width: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            gutter: 10.0,
            width: 0.0,
        }
    }
}

impl GridConfig {
    /// Reject configurations the layout core does not handle.
    pub fn validate(&self) -> MasonryResult<()> {
        validate_columns(self.columns)?;
        validate_gutter(self.gutter)?;
        validate_width(self.width)?;
        Ok(())
    }

    /// Larger of the forced width and the measured container width.
    pub fn layout_width(&self, container_width: f64) -> f64 {
        let container = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        self.width.max(container)
    }

    /// `ceil(layout_width / columns - gutter)`, recomputed on every call.
    pub fn column_width(&self, layout_width: f64) -> f64 {
        let columns = self.columns.max(1) as f64;
        (layout_width / columns - self.gutter).ceil()
    }
}

pub(crate) fn validate_columns(columns: usize) -> MasonryResult<()> {
    if columns == 0 {
        return Err(MasonryError::validation("columns must be >= 1"));
    }
    Ok(())
}

pub(crate) fn validate_gutter(gutter: f64) -> MasonryResult<()> {
    if !gutter.is_finite() || gutter < 0.0 {
        return Err(MasonryError::validation(format!(
            "gutter must be finite and >= 0 (got {gutter})"
        )));
    }
    Ok(())
}

pub(crate) fn validate_width(width: f64) -> MasonryResult<()> {
    if !width.is_finite() || width < 0.0 {
        return Err(MasonryError::validation(format!(
            "width must be finite and >= 0 (got {width})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
