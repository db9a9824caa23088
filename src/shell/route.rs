//! Navigation routes
//!
//! The address fragment is the single source of navigation truth. Its
//! grammar is `viewId` or `viewId/param`, where the optional second
//! segment carries an entity id for the detail view.

/// The navigable screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Specialties,
    Patients,
    Clinicians,
    Places,
    Appointments,
    PatientDetail,
}

impl ViewId {
    /// The fragment segment naming this view.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Specialties => "specialties",
            ViewId::Patients => "patients",
            ViewId::Clinicians => "clinicians",
            ViewId::Places => "places",
            ViewId::Appointments => "appointments",
            ViewId::PatientDetail => "patient-detail",
        }
    }

    /// Display title, from a static per-view lookup.
    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Specialties => "Specialties",
            ViewId::Patients => "Patients",
            ViewId::Clinicians => "Clinicians",
            ViewId::Places => "Places",
            ViewId::Appointments => "Appointments",
            ViewId::PatientDetail => "Patient Details",
        }
    }

    /// Well-known relative path of this view's markup fragment.
    pub fn markup_path(&self) -> String {
        format!("{0}/{0}.html", self.as_str())
    }

    /// All views, for registry construction and navigation chrome.
    pub fn all() -> &'static [ViewId] {
        &[
            ViewId::Specialties,
            ViewId::Patients,
            ViewId::Clinicians,
            ViewId::Places,
            ViewId::Appointments,
            ViewId::PatientDetail,
        ]
    }

    fn parse(segment: &str) -> Option<ViewId> {
        ViewId::all().iter().copied().find(|v| v.as_str() == segment)
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed navigation target: a view plus an optional entity id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub view: ViewId,
    pub param: Option<u32>,
}

impl Route {
    pub fn new(view: ViewId) -> Self {
        Self { view, param: None }
    }

    pub fn with_param(view: ViewId, param: u32) -> Self {
        Self {
            view,
            param: Some(param),
        }
    }

    /// Parse a fragment. `None` for an empty or unknown view segment.
    ///
    /// A malformed param segment is dropped rather than failing the whole
    /// route; the view decides what an absent param means.
    pub fn parse(fragment: &str) -> Option<Route> {
        let fragment = fragment.trim_start_matches('#');
        let mut segments = fragment.splitn(2, '/');
        let view = ViewId::parse(segments.next().unwrap_or_default())?;
        let param = segments.next().and_then(|raw| raw.parse::<u32>().ok());
        Some(Route { view, param })
    }

    /// The fragment this route round-trips to.
    pub fn fragment(&self) -> String {
        match self.param {
            Some(id) => format!("{}/{}", self.view.as_str(), id),
            None => self.view.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fragment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_view() {
        let route = Route::parse("patients").unwrap();
        assert_eq!(route.view, ViewId::Patients);
        assert_eq!(route.param, None);
    }

    #[test]
    fn test_parse_view_with_param() {
        let route = Route::parse("patient-detail/7").unwrap();
        assert_eq!(route.view, ViewId::PatientDetail);
        assert_eq!(route.param, Some(7));
    }

    #[test]
    fn test_parse_strips_leading_hash() {
        let route = Route::parse("#places").unwrap();
        assert_eq!(route.view, ViewId::Places);
    }

    #[test]
    fn test_parse_rejects_unknown_view() {
        assert_eq!(Route::parse("dashboard"), None);
        assert_eq!(Route::parse(""), None);
    }

    #[test]
    fn test_malformed_param_is_dropped() {
        let route = Route::parse("patient-detail/abc").unwrap();
        assert_eq!(route.param, None);
    }

    #[test]
    fn test_fragment_roundtrip() {
        let route = Route::with_param(ViewId::PatientDetail, 3);
        assert_eq!(route.fragment(), "patient-detail/3");
        assert_eq!(Route::parse(&route.fragment()), Some(route));

        let route = Route::new(ViewId::Specialties);
        assert_eq!(route.fragment(), "specialties");
    }

    #[test]
    fn test_markup_paths() {
        assert_eq!(ViewId::Patients.markup_path(), "patients/patients.html");
        assert_eq!(
            ViewId::PatientDetail.markup_path(),
            "patient-detail/patient-detail.html"
        );
    }
}
