/// Vertically scrolling index indicator. Only the orchestrator moves it.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterStrip {
    len: usize,
    row_height: f32,
    offset_y: f32,
}

impl CounterStrip {
    pub fn new(len: usize, row_height: f32) -> Self {
        Self { len, row_height, offset_y: 0.0 }
    }

    pub fn label(index: usize) -> String {
        format!("{:02}", index + 1)
    }

    pub fn labels(&self) -> Vec<String> {
        (0..self.len).map(Self::label).collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Distance the strip has scrolled up, in pixels.
    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn offset_for(&self, index: usize) -> f32 {
        self.row_height * index as f32
    }

    pub(crate) fn set_offset(&mut self, offset_y: f32) {
        self.offset_y = offset_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_zero_padded() {
        let strip = CounterStrip::new(5, 40.0);
        assert_eq!(strip.labels(), ["01", "02", "03", "04", "05"]);
        assert_eq!(CounterStrip::label(11), "12");
    }

    #[test]
    fn offset_is_one_row_per_index() {
        let strip = CounterStrip::new(5, 40.0);
        assert_eq!(strip.offset_y(), 0.0);
        assert_eq!(strip.offset_for(3), 120.0);
    }
}
