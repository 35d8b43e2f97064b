use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::config::BankAccount;
use crate::error::ImportError;
use crate::fs::FileStore;

/// День месяца, начиная с которого прошлый месяц считается закрытым
const ARCHIVE_DAY: u32 = 8;

/// Убирает выписки прошлого месяца из рабочего каталога в `imported`.
///
/// До восьмого числа ничего не делает. Дальше для каждого настроенного
/// счёта перебираются имена `<метка>_<ггмм><дд>.xml` за все дни прошлого
/// месяца; существующие файлы переезжают, остальные дни просто
/// пропускаются. Сколько файлов переехало, не сообщается - кому нужно,
/// тот смотрит в каталог сам.
pub fn archive_last_month(
    store: &impl FileStore,
    working_dir: &Path,
    accounts: &[BankAccount],
    today: NaiveDate,
) -> Result<(), ImportError> {
    if today.day() < ARCHIVE_DAY {
        return Ok(());
    }

    let (year, month) = if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };
    let year_month = format!("{:02}{month:02}", year.rem_euclid(100));

    let imported = working_dir.join("imported");
    store.create_dir_all(&imported)?;

    for account in accounts {
        for day in 1..=31 {
            let name = format!("{}_{year_month}{day:02}.xml", account.label);
            let src = working_dir.join(&name);

            if store.exists(&src) {
                store.rename(&src, &imported.join(&name))?;
                info!(file = %name, "archived statement file");
            }
        }
    }

    Ok(())
}
