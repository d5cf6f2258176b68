//! Display names for the current study context.

use crate::catalog::Catalog;
use crate::model::preferences::Preferences;
use std::fmt::{Display, Formatter};

const UNIVERSITY_PLACEHOLDER: &str = "Select university";
const STREAM_PLACEHOLDER: &str = "Select stream";
const CONTEXT_PLACEHOLDER: &str = "Set context";

/// Human-readable context, with placeholders for missing selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSummary {
    pub university: String,
    pub stream: String,
    pub college: Option<String>,
}

impl Display for ContextSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.university, self.stream)?;
        if let Some(college) = &self.college {
            write!(f, " • {college}")?;
        }
        Ok(())
    }
}

/// Resolves context ids to catalog names.
///
/// Unknown ids fall back to the same placeholders as unset ones.
pub fn context_summary(catalog: &Catalog, prefs: &Preferences) -> ContextSummary {
    let university = prefs
        .university_id
        .as_deref()
        .and_then(|id| catalog.university(id))
        .map_or_else(|| UNIVERSITY_PLACEHOLDER.to_string(), |u| u.name.clone());

    let stream = match prefs.stream_id.as_deref().and_then(|id| catalog.stream(id)) {
        Some(stream) => stream.name.clone(),
        None if prefs.university_id.is_some() => STREAM_PLACEHOLDER.to_string(),
        None => CONTEXT_PLACEHOLDER.to_string(),
    };

    let college = prefs
        .college_id
        .as_deref()
        .and_then(|id| catalog.college(id))
        .map(|college| college.name.clone());

    ContextSummary {
        university,
        stream,
        college,
    }
}

#[cfg(test)]
mod tests {
    use super::context_summary;
    use crate::catalog::Catalog;
    use crate::model::preferences::Preferences;

    #[test]
    fn unset_context_uses_placeholders() {
        let catalog = Catalog::sample().expect("sample catalog");
        let summary = context_summary(&catalog, &Preferences::default());
        assert_eq!(summary.university, "Select university");
        assert_eq!(summary.stream, "Set context");
        assert_eq!(summary.college, None);
    }

    #[test]
    fn university_without_stream_asks_for_stream() {
        let catalog = Catalog::sample().expect("sample catalog");
        let prefs = Preferences {
            university_id: Some("U1".to_string()),
            college_id: Some("C1".to_string()),
            ..Preferences::default()
        };
        let summary = context_summary(&catalog, &prefs);
        assert_eq!(summary.university, "University of Mumbai");
        assert_eq!(summary.stream, "Select stream");
        assert_eq!(
            summary.to_string(),
            "University of Mumbai | Select stream • Veermata Jijabai Technological Institute"
        );
    }
}
