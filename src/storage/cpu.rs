//! CPU storage backend implementation.

use super::Storage;
use crate::error::Result;
use std::fmt::Debug;

/// CPU storage using a simple `Vec`.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuStorage<T> {
    data: Vec<T>,
}

impl<T> CpuStorage<T> {
    /// Create a new CPU storage from a vector.
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Consumes the storage, returning the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Debug + Send + Sync + 'static> Storage<T> for CpuStorage<T> {
    fn from_vec(data: Vec<T>) -> Result<Self> {
        Ok(Self::new(data))
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn as_slice(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_storage() {
        let storage = CpuStorage::from_vec(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(storage.len(), 4);
        assert_eq!(storage.as_slice()[3], 4);
        assert!(!storage.is_empty());
        assert_eq!(storage.into_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_cpu_storage() {
        let storage = CpuStorage::<f32>::from_vec(Vec::new()).unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.as_slice(), &[] as &[f32]);
    }
}
