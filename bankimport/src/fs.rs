use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ImportError;

/// Минимальный интерфейс к файловой системе для роутинга и архивации.
///
/// Сами переходы raw -> routed -> imported кодируются только расположением
/// и именем файла, поэтому всю работу с диском логика делает через этот
/// трейт и в тестах подменяется хранилищем в памяти.
pub trait FileStore {
    /// Файлы каталога (без подкаталогов), отсортированные по имени
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ImportError>;

    fn read_to_string(&self, path: &Path) -> Result<String, ImportError>;

    /// Переносит файл; существующий файл назначения перезаписывается
    fn rename(&self, from: &Path, to: &Path) -> Result<(), ImportError>;

    /// Копирует файл; существующий файл назначения перезаписывается
    fn copy(&self, from: &Path, to: &Path) -> Result<(), ImportError>;

    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> Result<(), ImportError>;
}

/// Настоящая файловая система.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileStore;

impl FileStore for OsFileStore {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ImportError> {
        let mut files = Vec::new();

        for dir_entry in fs::read_dir(dir)? {
            let path = dir_entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ImportError> {
        Ok(fs::read_to_string(path)?)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), ImportError> {
        Ok(fs::rename(from, to)?)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), ImportError> {
        fs::copy(from, to)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), ImportError> {
        Ok(fs::create_dir_all(path)?)
    }
}

/// Хранилище в памяти для тестов.
///
/// Ядро однопоточное, так что хватает RefCell.
#[derive(Debug, Default)]
pub struct MemFileStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl MemFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), content.into());
    }

    pub fn content(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Все известные файлы, по возрастанию пути
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl FileStore for MemFileStore {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ImportError> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ImportError> {
        self.content(path).ok_or_else(|| {
            ImportError::BadInput(format!("no such file in store: {}", path.display()))
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), ImportError> {
        let mut files = self.files.borrow_mut();
        let content = files.remove(from).ok_or_else(|| {
            ImportError::BadInput(format!("no such file in store: {}", from.display()))
        })?;
        files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), ImportError> {
        let mut files = self.files.borrow_mut();
        let content = files
            .get(from)
            .cloned()
            .ok_or_else(|| {
                ImportError::BadInput(format!("no such file in store: {}", from.display()))
            })?;
        files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn create_dir_all(&self, _path: &Path) -> Result<(), ImportError> {
        // каталоги в памяти не моделируем
        Ok(())
    }
}
