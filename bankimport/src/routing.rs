mod utils;

use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::camt053;
use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::fs::FileStore;
use utils::*;

/// Раскладывает сырые банковские выгрузки по каталогам юрлиц.
///
/// В сыром каталоге лежат файлы нескольких банков и юрлиц. Каждый файл,
/// похожий по имени на выгрузку CAMT.053, привязывается по IBAN из имени к
/// настроенному счёту и переезжает под каноническим именем в каталог своего
/// юрлица; существующий файл назначения перезаписывается. Выписка на рубеже
/// календарных лет дополнительно копируется в слот 31 декабря старого года.
///
/// Файл без подходящего счёта или с нечитаемым содержимым остаётся на
/// месте до следующего прохода. Отсутствие настроенных счетов роняет весь
/// проход целиком, частичная раскладка не делается.
///
/// Переезды не транзакционны: прерывание между переносом и копией на
/// рубеже года может оставить копию несозданной.
pub fn split_files_and_move(
    store: &impl FileStore,
    config: &ImportConfig,
) -> Result<(), ImportError> {
    if config.bank_accounts.is_empty() {
        return Err(ImportError::MissingConfiguration("BankAccounts".into()));
    }

    create_directories(store, config)?;

    for file in store.list_files(&config.raw_path)? {
        let Some(name) = file.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };

        if !is_raw_export_name(&name) || tentative_date(&name).is_none() {
            debug!(file = %name, "not a raw CAMT.053 export, skipping");
            continue;
        }

        let Some(iban) = tentative_iban(&name) else {
            debug!(file = %name, "no IBAN at the expected offset, skipping");
            continue;
        };

        let Some(account) = config
            .bank_accounts
            .iter()
            .find(|acc| iban.ends_with(&acc.suffix))
        else {
            // счёт не настроен - файл остаётся лежать до следующего прохода
            debug!(file = %name, "no configured account matches, leaving in place");
            continue;
        };

        // дате в имени не доверяем, дату знает сама выписка
        let xml = store.read_to_string(&file)?;
        let statements = match camt053::parse_statements(&xml, &name) {
            Ok(statements) => statements,
            Err(err) => {
                warn!(file = %name, error = %err, "cannot parse raw file, leaving in place");
                continue;
            }
        };

        // решение о дубле через границу года принимается по первой выписке:
        // после раскладки в файле ожидается одна выписка
        let Some(stmt) = statements.first() else {
            warn!(file = %name, "raw file has no statements, leaving in place");
            continue;
        };

        let crosses_year = stmt
            .transactions
            .iter()
            .any(|tx| tx.value_date.year() != stmt.date.year());

        let dest_dir = config.output_path.join(&account.directory);
        let dest = dest_dir.join(routed_name(&account.label, stmt.date));

        store.rename(&file, &dest)?;
        info!(from = %file.display(), to = %dest.display(), "routed statement file");

        if crosses_year {
            // выписку на рубеже лет должно быть видно и из слота старого года
            let year_end = dest_dir.join(year_end_name(&account.label, stmt.date.year() - 1));
            store.copy(&dest, &year_end)?;
            info!(to = %year_end.display(), "duplicated year-end statement");
        }
    }

    Ok(())
}

/// Создаёт выходной корень и каталоги юрлиц вместе с их `imported`
fn create_directories(store: &impl FileStore, config: &ImportConfig) -> Result<(), ImportError> {
    store.create_dir_all(&config.output_path)?;
    store.create_dir_all(&config.output_path.join("imported"))?;

    for account in &config.bank_accounts {
        let entity_dir = config.output_path.join(&account.directory);
        store.create_dir_all(&entity_dir)?;
        store.create_dir_all(&entity_dir.join("imported"))?;
    }

    Ok(())
}
