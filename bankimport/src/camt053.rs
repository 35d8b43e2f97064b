pub(crate) mod serde_models;
mod utils;

use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::ImportError;
use crate::model::Statement;
use quick_xml::de::from_str;
use serde_models::*;
use tracing::{debug, info};
use utils::*;

/// Единственный поддерживаемый диалект выписок
pub const CAMT053_NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:camt.053.001.02";

/// Типизированное содержимое одного CAMT.053-файла.
///
/// Пример использования:
/// ```no_run
/// use bankimport::Camt053Data;
/// # use bankimport::ImportError;
/// # fn main() -> Result<(), ImportError> {
/// let file = std::fs::File::open("statement.xml")?;
/// let statements = Camt053Data::parse(file)?.statements()?;
/// #     Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Camt053Data {
    pub(crate) document: Camt053Document,
}

impl Camt053Data {
    pub fn parse<R: Read>(reader: R) -> Result<Self, ImportError> {
        let mut buf_reader = BufReader::new(reader);
        let mut xml = String::new();
        buf_reader.read_to_string(&mut xml)?;

        // чистим неразрывные пробелы
        let xml = xml.replace('\u{00A0}', " ");

        let document: Camt053Document = from_str(&xml)?;

        if document.xmlns.as_deref() != Some(CAMT053_NAMESPACE) {
            return Err(ImportError::UnsupportedFormat(document.xmlns));
        }

        Ok(Camt053Data { document })
    }

    /// Конвертирует все <Stmt> файла в выписки, в порядке следования.
    ///
    /// Всё или ничего: одна битая операция роняет весь файл,
    /// частичные выписки наружу не отдаются.
    pub fn statements(self) -> Result<Vec<Statement>, ImportError> {
        self.document
            .bank_to_customer
            .statements
            .into_iter()
            .map(Statement::try_from)
            .collect()
    }
}

impl TryFrom<Camt053Statement> for Statement {
    type Error = ImportError;

    fn try_from(stmt: Camt053Statement) -> Result<Self, Self::Error> {
        let id = stmt
            .id
            .clone()
            .ok_or(ImportError::MissingField("Stmt/Id"))?;
        let account_code = stmt
            .account
            .id
            .iban
            .clone()
            .ok_or(ImportError::MissingField("Acct/Id/IBAN"))?;
        let bank_code = stmt
            .account
            .servicer
            .as_ref()
            .and_then(|svcr| svcr.fin_instn_id.bic.clone())
            .ok_or(ImportError::MissingField("Acct/Svcr/FinInstnId/BIC"))?;
        let currency = stmt
            .account
            .currency
            .clone()
            .ok_or(ImportError::MissingField("Acct/Ccy"))?;
        let account_name = stmt
            .account
            .owner
            .as_ref()
            .and_then(|ownr| ownr.name.clone())
            .ok_or(ImportError::MissingField("Acct/Ownr/Nm"))?;

        let (start_balance, end_balance, date) = extract_balances(&stmt)?;

        let transactions = stmt
            .entries
            .iter()
            .map(|e| transaction_from_entry(e, &currency, &account_name))
            .collect::<Result<_, ImportError>>()?;

        Ok(Statement {
            id,
            bank_code,
            account_code,
            account_name,
            currency,
            start_balance,
            end_balance,
            date,
            transactions,
        })
    }
}

/// Парсит содержимое одного файла в выписки.
///
/// `display_name` попадает в сообщение об ошибке вместе с исходной причиной;
/// расхождение валют и чужое пространство имён пробрасываются как есть.
pub fn parse_statements(xml: &str, display_name: &str) -> Result<Vec<Statement>, ImportError> {
    info!(file = display_name, "parsing CAMT.053 file");

    let statements = Camt053Data::parse(xml.as_bytes())
        .and_then(Camt053Data::statements)
        .map_err(|e| annotate(display_name, e))?;

    for stmt in &statements {
        debug!(
            statement = %stmt.id,
            transactions = stmt.transactions.len(),
            "parsed statement"
        );
    }

    Ok(statements)
}

/// Читает и парсит файл с диска, см. [`parse_statements`].
pub fn parse_file(path: &Path) -> Result<Vec<Statement>, ImportError> {
    let xml = fs::read_to_string(path)?;
    parse_statements(&xml, &path.display().to_string())
}

fn annotate(file: &str, err: ImportError) -> ImportError {
    match err {
        e @ (ImportError::UnsupportedFormat(_) | ImportError::CurrencyMismatch { .. }) => e,
        other => ImportError::MalformedDocument {
            file: file.to_string(),
            source: Box::new(other),
        },
    }
}
