#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    RowOutOfRange(usize),
    ColumnOutOfRange(usize),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::RowOutOfRange(index) => {
                write!(f, "Row index out of range: {}", index)
            }
            DomainError::ColumnOutOfRange(index) => {
                write!(f, "Column index out of range: {}", index)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
