pub const COLLECTION_PATH: &str = "/items";

/// One resolved entry of the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    GetOne(String),
    Create,
    Replace(String),
    Delete(String),
}

impl Operation {
    /// Maps (method, path) to exactly one operation. The id is the single
    /// segment after the collection path, taken verbatim: `/items/` yields
    /// the empty id and it flows to the store unchanged. Anything else,
    /// including paths with further segments, is None and becomes the 400
    /// default upstream.
    pub fn resolve(method: &str, path: &str) -> Option<Operation> {
        let item_id = path
            .strip_prefix("/items/")
            .filter(|rest| !rest.contains('/'));
        match (method, path, item_id) {
            ("GET", COLLECTION_PATH, _) => Some(Operation::List),
            ("GET", _, Some(id)) => Some(Operation::GetOne(id.to_string())),
            ("POST", COLLECTION_PATH, _) => Some(Operation::Create),
            ("PUT", _, Some(id)) => Some(Operation::Replace(id.to_string())),
            ("DELETE", _, Some(id)) => Some(Operation::Delete(id.to_string())),
            _ => None,
        }
    }
}
