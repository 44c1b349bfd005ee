use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// String identifier tagged with the kind of entity it names.
///
/// Flows, nodes and channels are all keyed by plain names in a workload description,
/// the tag keeps them from being mixed up.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize)]
pub struct Id<T> {
    pub id: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Id { id: id.into(), _marker: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for String {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> From<&str> for Id<T> {
    fn from(id: &str) -> Self {
        Id::new(id)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {:?}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct FlowTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct NodeTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct ChannelTag;

pub type FlowId = Id<FlowTag>;
pub type NodeId = Id<NodeTag>;
pub type ChannelId = Id<ChannelTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_uses_tag_name() {
        let flow = FlowId::new("F1");
        assert_eq!(format!("{:?}", flow), "FlowId: \"F1\"");
        assert_eq!(flow.to_string(), "F1");
    }

    #[test]
    fn test_ids_compare_by_name() {
        assert_eq!(NodeId::new("A"), NodeId::from("A"));
        assert!(ChannelId::new("0") < ChannelId::new("1"));
    }
}
