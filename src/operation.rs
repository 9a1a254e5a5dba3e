#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
}
