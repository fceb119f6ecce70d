/// Three-state update for an optional story, vision or sprint field.
///
/// - `NoChange`: the field keeps its current value
/// - `Set(value)`: the field becomes `Some(value)`
/// - `Clear`: the field becomes `None`
///
/// `StoryDraft::sprint_id` relies on the difference between `NoChange`
/// and `Clear`: an untouched draft lands in the current sprint, a cleared
/// one lands in no sprint at all.
///
/// # Example
///
/// ```
/// use lifescrum_domain::FieldUpdate;
///
/// let mut due: Option<String> = Some("2025-01-10".to_string());
/// FieldUpdate::Set("2025-02-01".to_string()).apply_to(&mut due);
/// assert_eq!(due.as_deref(), Some("2025-02-01"));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut due);
/// assert_eq!(due, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    /// Resolve against the value the field would otherwise have.
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            FieldUpdate::NoChange => current,
            FieldUpdate::Set(value) => Some(value),
            FieldUpdate::Clear => None,
        }
    }

    pub fn apply_to(self, field: &mut Option<T>) {
        let current = field.take();
        *field = self.resolve(current);
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some` becomes `Set`, `None` becomes `Clear`.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
