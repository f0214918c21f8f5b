//! Input validation limits

/// Maximum length for node names (256 chars)
pub const MAX_NODE_NAME_LEN: usize = 256;

/// Maximum BFS depth accepted from callers (10000)
pub const MAX_TRAVERSAL_DEPTH: u32 = 10_000;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyNodeName,
    NodeNameTooLong { len: usize, max: usize },
    NonPositiveWeight { weight: f64 },
    NonFiniteWeight,
    TraversalDepthTooLarge { depth: u32, max: u32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNodeName => write!(f, "Node name cannot be empty"),
            Self::NodeNameTooLong { len, max } => {
                write!(f, "Node name too long: {} chars (max {})", len, max)
            }
            Self::NonPositiveWeight { weight } => {
                write!(f, "Edge weight must be greater than 0 (got {})", weight)
            }
            Self::NonFiniteWeight => write!(f, "Edge weight must be a finite number"),
            Self::TraversalDepthTooLarge { depth, max } => {
                write!(f, "Traversal depth too large: {} (max {})", depth, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate node name
pub fn validate_node_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyNodeName);
    }
    if name.len() > MAX_NODE_NAME_LEN {
        return Err(ValidationError::NodeNameTooLong {
            len: name.len(),
            max: MAX_NODE_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate edge weight
pub fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if !weight.is_finite() {
        return Err(ValidationError::NonFiniteWeight);
    }
    if weight <= 0.0 {
        return Err(ValidationError::NonPositiveWeight { weight });
    }
    Ok(())
}

/// Validate traversal depth
pub fn validate_traversal_depth(depth: u32) -> Result<(), ValidationError> {
    if depth > MAX_TRAVERSAL_DEPTH {
        return Err(ValidationError::TraversalDepthTooLarge {
            depth,
            max: MAX_TRAVERSAL_DEPTH,
        });
    }
    Ok(())
}
