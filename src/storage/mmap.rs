//! Memory-mapped storage backend.

use super::Storage;
use crate::error::Result;
use memmap2::{MmapMut, MmapOptions};
use std::{
    fmt::Debug,
    fs::{self, OpenOptions},
    marker::PhantomData,
    path::{Path, PathBuf},
};

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Element types that can be placed in a memory map. Every bit pattern is a
/// valid value and the alignment never exceeds a page.
pub trait MapElement: num_traits::Float + Debug + Send + Sync + 'static + private::Sealed {}

impl MapElement for f32 {}
impl MapElement for f64 {}

/// Storage backed by a memory map, either anonymous or over a file.
///
/// File-backed storages create a uniquely named file in the chosen directory
/// and remove it again when dropped.
#[derive(Debug)]
pub struct MmapStorage<T> {
    map: Option<MmapMut>,
    len: usize,
    path: Option<PathBuf>,
    _marker: PhantomData<T>,
}

impl<T: MapElement> MmapStorage<T> {
    /// Copies `data` into a fresh anonymous memory map.
    pub fn anonymous(data: &[T]) -> Result<Self> {
        let bytes = std::mem::size_of_val(data);
        // zero-length maps are rejected by the OS, an empty storage needs none
        let map = if bytes == 0 {
            None
        } else {
            Some(MmapMut::map_anon(bytes)?)
        };
        let mut storage = Self {
            map,
            len: data.len(),
            path: None,
            _marker: PhantomData,
        };
        storage.write(data);
        Ok(storage)
    }

    /// Copies `data` into a memory map over a new file inside `dir`.
    pub fn in_dir(dir: &Path, data: &[T]) -> Result<Self> {
        let bytes = std::mem::size_of_val(data);
        if bytes == 0 {
            return Self::anonymous(data);
        }

        let path = dir.join(format!("dimcheck_{}.mmap", uuid::Uuid::new_v4()));
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)?;

        // SAFETY: the file was just created under a unique name, nothing else maps it.
        let mapped = file
            .set_len(bytes as u64)
            .and_then(|_| unsafe { MmapOptions::new().len(bytes).map_mut(&file) });
        let map = match mapped {
            Ok(map) => map,
            Err(e) => {
                let _ = fs::remove_file(&path);
                return Err(e.into());
            }
        };

        let mut storage = Self {
            map: Some(map),
            len: data.len(),
            path: Some(path),
            _marker: PhantomData,
        };
        storage.write(data);
        Ok(storage)
    }

    /// Path of the backing file, if the storage is file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn write(&mut self, data: &[T]) {
        let len = self.len;
        if let Some(map) = self.map.as_mut() {
            // SAFETY: the map is page aligned and exactly `len * size_of::<T>()` bytes long.
            let dst = unsafe { std::slice::from_raw_parts_mut(map.as_mut_ptr() as *mut T, len) };
            dst.copy_from_slice(data);
        }
    }
}

impl<T: MapElement> Storage<T> for MmapStorage<T> {
    fn from_vec(data: Vec<T>) -> Result<Self> {
        Self::anonymous(&data)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn as_slice(&self) -> &[T] {
        match &self.map {
            // SAFETY: the map is page aligned, holds `len` initialised elements, and `T`
            // accepts any bit pattern.
            Some(map) => unsafe { std::slice::from_raw_parts(map.as_ptr() as *const T, self.len) },
            None => &[],
        }
    }
}

impl<T> Drop for MmapStorage<T> {
    fn drop(&mut self) {
        self.map.take();
        if let Some(path) = self.path.take() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove mmap backing file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_anonymous_storage() {
        let storage = MmapStorage::<f32>::from_vec(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(storage.len(), 4);
        assert_eq!(storage.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(storage.path().is_none());
    }

    #[test]
    fn test_empty_storage() {
        let storage = MmapStorage::<f64>::from_vec(Vec::new()).unwrap();
        assert!(storage.is_empty());
        assert!(storage.as_slice().is_empty());
    }

    #[test]
    fn test_file_backed_storage_is_removed_on_drop() {
        let dir = tempdir().unwrap();
        let storage = MmapStorage::<f64>::in_dir(dir.path(), &[10.0, 20.0]).unwrap();
        let path = storage.path().unwrap().to_path_buf();
        assert!(path.exists());
        assert_eq!(storage.as_slice(), &[10.0, 20.0]);

        drop(storage);
        assert!(!path.exists());
    }
}
