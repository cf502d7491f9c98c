// Detail overlay: one project at a time, modal
use crate::models::ProjectDisplayRecord;

/// Where a pointer event landed while the overlay was up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dimmed backdrop itself
    Background,
    /// Anywhere inside the content panel
    Content,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Closed,
    /// Holds its own copy; reloading the project lists does not touch it
    Open(ProjectDisplayRecord),
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        matches!(self, Overlay::Open(_))
    }

    pub fn record(&self) -> Option<&ProjectDisplayRecord> {
        match self {
            Overlay::Open(record) => Some(record),
            Overlay::Closed => None,
        }
    }

    /// Opening while already open swaps in the new record
    pub fn open(&mut self, record: ProjectDisplayRecord) {
        *self = Overlay::Open(record);
    }

    /// Returns whether anything changed
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Overlay::Closed;
        was_open
    }

    /// Clicks on the backdrop close; clicks on the content do not
    pub fn pointer(&mut self, target: PointerTarget) -> bool {
        match target {
            PointerTarget::Background => self.close(),
            PointerTarget::Content => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> ProjectDisplayRecord {
        ProjectDisplayRecord {
            title: title.to_string(),
            description: "d".to_string(),
            link: None,
        }
    }

    #[test]
    fn test_open_then_close() {
        let mut overlay = Overlay::default();
        assert!(!overlay.is_open());

        overlay.open(record("BPO"));
        assert_eq!(overlay.record().map(|r| r.title.as_str()), Some("BPO"));

        assert!(overlay.close());
        assert!(!overlay.is_open());
        assert!(!overlay.close());
    }

    #[test]
    fn test_only_background_clicks_close() {
        let mut overlay = Overlay::default();
        overlay.open(record("BPO"));

        assert!(!overlay.pointer(PointerTarget::Content));
        assert!(overlay.is_open());

        assert!(overlay.pointer(PointerTarget::Background));
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_open_holds_a_snapshot() {
        let mut source = vec![record("before")];
        let mut overlay = Overlay::default();
        overlay.open(source[0].clone());

        source[0].title = "after".into();
        source.clear();

        assert_eq!(overlay.record().unwrap().title, "before");
    }
}
