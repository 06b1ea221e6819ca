use crate::error::TodoError;

pub type TodoResult<T> = Result<T, TodoError>;
