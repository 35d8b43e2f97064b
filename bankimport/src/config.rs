use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ImportError;

/// Один настроенный банковский счёт.
///
/// Раньше это была позиционная тройка в строке `BankAccounts`;
/// теперь поля именованы и проверяются один раз при загрузке.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    /// хвост номера счёта (IBAN), по которому матчится сырой файл
    pub suffix: String,
    /// короткая метка, идёт в канонические имена файлов
    pub label: String,
    /// каталог юрлица под выходным корнем
    pub directory: String,
}

/// Конфигурация импорта, провалидированная при загрузке.
#[derive(Debug, Clone, Default)]
pub struct ImportConfig {
    /// каталог с сырыми банковскими выгрузками (`RawCAMT.Path`)
    pub raw_path: PathBuf,
    /// корень разложенных файлов (`CAMT.Output.Path`)
    pub output_path: PathBuf,
    /// настроенные счета (`BankAccounts`)
    pub bank_accounts: Vec<BankAccount>,
    /// рабочие каталоги по номерам леджеров (`BankimportPath<N>`)
    pub ledger_paths: HashMap<u32, PathBuf>,
    /// отображаемые имена счетов (`BankNameFor<bankCode>/<accountCode>`)
    pub bank_names: HashMap<String, String>,
}

const KEY_BANK_ACCOUNTS: &str = "BankAccounts";
const KEY_RAW_PATH: &str = "RawCAMT.Path";
const KEY_OUTPUT_PATH: &str = "CAMT.Output.Path";
const KEY_LEDGER_PATH_PREFIX: &str = "BankimportPath";
const KEY_BANK_NAME_PREFIX: &str = "BankNameFor";

impl ImportConfig {
    /// Собирает конфигурацию из плоских пар ключ/значение
    /// (исторический формат настроек).
    pub fn from_pairs(pairs: &HashMap<String, String>) -> Result<Self, ImportError> {
        let raw_accounts = pairs
            .get(KEY_BANK_ACCOUNTS)
            .ok_or_else(|| ImportError::MissingConfiguration(KEY_BANK_ACCOUNTS.into()))?;
        let bank_accounts = parse_bank_accounts(raw_accounts)?;

        let raw_path = pairs
            .get(KEY_RAW_PATH)
            .ok_or_else(|| ImportError::MissingConfiguration(KEY_RAW_PATH.into()))?;
        let output_path = pairs
            .get(KEY_OUTPUT_PATH)
            .ok_or_else(|| ImportError::MissingConfiguration(KEY_OUTPUT_PATH.into()))?;

        let mut ledger_paths = HashMap::new();
        let mut bank_names = HashMap::new();

        for (key, value) in pairs {
            if let Some(number) = key.strip_prefix(KEY_LEDGER_PATH_PREFIX) {
                let ledger: u32 = number.parse().map_err(|_| {
                    ImportError::MissingConfiguration(format!("bad ledger number in key {key}"))
                })?;
                ledger_paths.insert(ledger, PathBuf::from(value));
            } else if let Some(account) = key.strip_prefix(KEY_BANK_NAME_PREFIX) {
                bank_names.insert(account.to_string(), value.clone());
            }
        }

        Ok(ImportConfig {
            raw_path: PathBuf::from(raw_path),
            output_path: PathBuf::from(output_path),
            bank_accounts,
            ledger_paths,
            bank_names,
        })
    }

    /// Загружает конфигурацию из TOML-таблицы строковых ключей.
    pub fn from_toml_str(raw: &str) -> Result<Self, ImportError> {
        let table: toml::Table = raw.parse()?;

        let pairs: HashMap<String, String> = table
            .into_iter()
            .filter_map(|(key, value)| match value {
                toml::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect();

        Self::from_pairs(&pairs)
    }

    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Отображаемая метка для счёта `<bankCode>/<accountCode>`.
    ///
    /// Если явного имени в конфигурации нет, остаётся сам составной ключ.
    pub fn display_label(&self, bank_code: &str, account_code: &str) -> String {
        let key = format!("{bank_code}/{account_code}");
        match self.bank_names.get(&key) {
            Some(name) => name.clone(),
            None => key,
        }
    }

    /// Рабочий каталог леджера.
    pub fn ledger_path(&self, ledger: u32) -> Result<&Path, ImportError> {
        self.ledger_paths
            .get(&ledger)
            .map(PathBuf::as_path)
            .ok_or_else(|| {
                ImportError::MissingConfiguration(format!("{KEY_LEDGER_PATH_PREFIX}{ledger}"))
            })
    }
}

/// Разбирает историческую строку `BankAccounts`:
/// тройки "хвост счёта, метка, каталог юрлица" через запятую.
fn parse_bank_accounts(raw: &str) -> Result<Vec<BankAccount>, ImportError> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();

    if fields.len() % 3 != 0 {
        return Err(ImportError::MissingConfiguration(format!(
            "{KEY_BANK_ACCOUNTS} must hold suffix,label,directory triples, got {} fields",
            fields.len()
        )));
    }

    let mut accounts = Vec::with_capacity(fields.len() / 3);

    for triple in fields.chunks(3) {
        if triple.iter().any(|f| f.is_empty()) {
            return Err(ImportError::MissingConfiguration(format!(
                "{KEY_BANK_ACCOUNTS} has an empty field in triple {triple:?}"
            )));
        }

        accounts.push(BankAccount {
            suffix: triple[0].to_string(),
            label: triple[1].to_string(),
            directory: triple[2].to_string(),
        });
    }

    if accounts.is_empty() {
        return Err(ImportError::MissingConfiguration(format!(
            "{KEY_BANK_ACCOUNTS} is empty"
        )));
    }

    Ok(accounts)
}
