use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one remote search for an already validated keyword.
    StartSearch { request_id: RequestId, keyword: String },
    /// Abandon a search that a newer submission superseded.
    CancelSearch { request_id: RequestId },
}
