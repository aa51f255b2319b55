use uuid::Uuid;

use crate::{
    property::{location::PropertyLocation, property::Property},
    types::{CanShowAs, ShowAs},
};

/// A remote-visible pin that redirects to a property by id.
///
/// The portal keeps its own id for as long as it exists; only `source_id`
/// moves when the property underneath is rebuilt.
#[derive(Clone, Debug)]
pub struct Portal {
    id: Uuid,
    source_id: Uuid,
    pub display_name: String,
    type_name: String,
    pub category: String,
    pub show_as: ShowAs,
    can_show_as: CanShowAs,
    location: Option<PropertyLocation>,
    orphan_reason: Option<String>,
}

impl Portal {
    pub(crate) fn new(id: Uuid, source: &Property, display_name: String, show_as: ShowAs) -> Self {
        Self {
            id,
            source_id: source.id(),
            display_name,
            type_name: source.type_name().to_string(),
            category: source.category.clone(),
            show_as,
            can_show_as: source.can_show_as(),
            location: PropertyLocation::from_property(source),
            orphan_reason: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source_id(&self) -> Uuid {
        self.source_id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn can_show_as(&self) -> CanShowAs {
        self.can_show_as
    }

    /// Stable location of the source, recorded when the portal was made
    pub fn location(&self) -> Option<&PropertyLocation> {
        self.location.as_ref()
    }

    pub fn is_orphan(&self) -> bool {
        self.orphan_reason.is_some()
    }

    pub fn orphan_reason(&self) -> Option<&str> {
        self.orphan_reason.as_deref()
    }

    pub(crate) fn set_orphan(&mut self, reason: &str) {
        self.orphan_reason = Some(reason.to_string());
    }

    pub(crate) fn bind(&mut self, source: &Property) {
        self.source_id = source.id();
        self.can_show_as = source.can_show_as();
        if let Some(location) = PropertyLocation::from_property(source) {
            self.location = Some(location);
        }
        self.orphan_reason = None;
    }
}
