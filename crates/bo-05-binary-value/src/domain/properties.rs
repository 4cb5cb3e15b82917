//! # Property Set
//!
//! The single table of properties a Binary Value object exposes. Membership
//! in this table decides between `WriteAccessDenied` (known, read-only) and
//! `UnknownProperty`; the required/optional lists are views over it.

use serde::{Deserialize, Serialize};
use shared_types::PropertyIdentifier;

/// Conformance group of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyGroup {
    Required,
    Optional,
    Proprietary,
}

/// Every property of the object, with its group.
pub const PROPERTY_TABLE: &[(PropertyIdentifier, PropertyGroup)] = &[
    (PropertyIdentifier::ObjectIdentifier, PropertyGroup::Required),
    (PropertyIdentifier::ObjectName, PropertyGroup::Required),
    (PropertyIdentifier::ObjectType, PropertyGroup::Required),
    (PropertyIdentifier::PresentValue, PropertyGroup::Required),
    (PropertyIdentifier::StatusFlags, PropertyGroup::Required),
    (PropertyIdentifier::EventState, PropertyGroup::Required),
    (PropertyIdentifier::OutOfService, PropertyGroup::Required),
    (PropertyIdentifier::Description, PropertyGroup::Optional),
    (PropertyIdentifier::Reliability, PropertyGroup::Optional),
    (PropertyIdentifier::ActiveText, PropertyGroup::Optional),
    (PropertyIdentifier::InactiveText, PropertyGroup::Optional),
    (PropertyIdentifier::Polarity, PropertyGroup::Optional),
];

/// Group of `property`, or `None` if the object does not have it.
pub fn group_of(property: PropertyIdentifier) -> Option<PropertyGroup> {
    PROPERTY_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == property)
        .map(|(_, group)| *group)
}

/// Whether the object has `property` at all.
pub fn is_member(property: PropertyIdentifier) -> bool {
    group_of(property).is_some()
}

/// Required / optional / proprietary property lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyLists {
    pub required: Vec<PropertyIdentifier>,
    pub optional: Vec<PropertyIdentifier>,
    pub proprietary: Vec<PropertyIdentifier>,
}

/// Build the three lists from [`PROPERTY_TABLE`], in table order.
pub fn property_lists() -> PropertyLists {
    let mut lists = PropertyLists::default();
    for (property, group) in PROPERTY_TABLE {
        match group {
            PropertyGroup::Required => lists.required.push(*property),
            PropertyGroup::Optional => lists.optional.push(*property),
            PropertyGroup::Proprietary => lists.proprietary.push(*property),
        }
    }
    lists
}
