mod utils;

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::ImportConfig;
use crate::model::{Amount, Statement, Transaction};
use utils::*;

/// Ёмкость поля имени файла у сохраняемой выписки
pub const STATEMENT_FILENAME_CAPACITY: usize = 64;

/// Пометка кандидата в пожертвования, дописывается к коду типа операции
pub const GIFT_CANDIDATE_SUFFIX: &str = " (gift?)";

/// Выписка, подготовленная к сохранению.
///
/// Настоящие ключи раздаёт сервер при сохранении, до этого выписки внутри
/// одной сессии импорта различаются отрицательными ключами.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportStatement {
    /// отрицательный ключ сессии импорта
    pub key: i64,
    /// идентификатор выписки от банка
    pub id: String,
    /// код банковского счёта главной книги, под который идёт импорт
    pub bank_account_code: String,
    /// BIC банка-владельца
    pub bank_code: String,
    /// IBAN счёта-владельца
    pub account_code: String,
    pub currency: String,
    pub start_balance: Amount,
    pub end_balance: Amount,
    pub date: NaiveDate,
    /// отображаемое имя файла либо короткая метка счёта
    pub filename: String,
}

/// Одна строка импорта, выведенная из распарсенной операции.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportRow {
    /// ключ выписки-владельца (отрицательный)
    pub statement_key: i64,
    /// порядковый номер операции в файле
    pub order: usize,
    pub value_date: NaiveDate,
    pub input_date: NaiveDate,
    pub amount: Amount,
    pub description: String,
    /// код типа операции, возможно с пометкой пожертвования
    pub typecode: String,
    pub iban: String,
    pub bic: String,
    /// код банка контрагента без ведущих нулей
    pub branch_code: String,
    /// номер счёта контрагента без ведущих нулей
    pub account_number: String,
    pub partner_name: String,
    /// номер строки на бумажной выписке
    pub position: u32,
}

/// Накапливаемый результат одной сессии импорта.
///
/// Единственный артефакт, который уходит внешнему слою сохранения.
#[derive(Debug, Default)]
pub struct ImportSet {
    pub statements: Vec<ImportStatement>,
    pub rows: Vec<ImportRow>,
    next_key: i64,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет распарсенные выписки под очередными отрицательными ключами.
    ///
    /// `filename` - отображаемое имя исходного файла; если оно не влезает в
    /// поле выписки, вместо него подставляется настроенная метка счёта.
    pub fn append(
        &mut self,
        statements: &[Statement],
        bank_account_code: &str,
        filename: &str,
        config: &ImportConfig,
    ) {
        for stmt in statements {
            self.next_key -= 1;
            let key = self.next_key;

            let stored_name = if filename.chars().count() > STATEMENT_FILENAME_CAPACITY {
                config.display_label(&stmt.bank_code, &stmt.account_code)
            } else {
                filename.to_string()
            };

            self.statements.push(ImportStatement {
                key,
                id: stmt.id.clone(),
                bank_account_code: bank_account_code.to_string(),
                bank_code: stmt.bank_code.clone(),
                account_code: stmt.account_code.clone(),
                currency: stmt.currency.clone(),
                start_balance: stmt.start_balance,
                end_balance: stmt.end_balance,
                date: stmt.date,
                filename: stored_name,
            });

            let mut rows: Vec<ImportRow> = stmt
                .transactions
                .iter()
                .enumerate()
                .map(|(order, tx)| row_from_transaction(key, order, tx))
                .collect();

            assign_positions(&mut rows);

            debug!(
                statement = %stmt.id,
                key,
                rows = rows.len(),
                "built import rows"
            );

            self.rows.extend(rows);
        }
    }

    /// Строки одной выписки, в порядке следования в файле
    pub fn rows_for(&self, statement_key: i64) -> impl Iterator<Item = &ImportRow> {
        self.rows
            .iter()
            .filter(move |row| row.statement_key == statement_key)
    }
}

fn row_from_transaction(statement_key: i64, order: usize, tx: &Transaction) -> ImportRow {
    let idents = normalize_account(tx.bank_code.as_deref(), tx.account_code.as_deref());

    ImportRow {
        statement_key,
        order,
        value_date: tx.value_date,
        input_date: tx.input_date,
        amount: tx.amount,
        description: tx.description.clone(),
        typecode: flag_gift_candidate(&tx.typecode),
        iban: idents.iban,
        bic: idents.bic,
        branch_code: idents.branch_code,
        account_number: idents.account_number,
        partner_name: tx.partner_name.clone().unwrap_or_default(),
        position: 0,
    }
}

impl fmt::Display for ImportStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4} {} {:<10} {:<6} {:>15} {:>15} {}",
            self.key,
            self.date,
            self.id,
            self.currency,
            self.start_balance,
            self.end_balance,
            self.account_code,
        )
    }
}

impl fmt::Display for ImportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4} {} {} {:>15} {:<12} {} {}",
            self.position,
            self.value_date,
            self.input_date,
            self.amount,
            self.typecode,
            self.partner_name,
            self.description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(id: &str, amounts: &[Amount]) -> Statement {
        Statement {
            id: id.to_string(),
            bank_code: "COBADEFFXXX".to_string(),
            account_code: "DE89370400440532013000".to_string(),
            account_name: "Our Charity".to_string(),
            currency: "EUR".to_string(),
            start_balance: 0,
            end_balance: amounts.iter().sum(),
            date: NaiveDate::from_ymd_opt(2023, 4, 20).unwrap(),
            transactions: amounts
                .iter()
                .map(|&amount| Transaction {
                    value_date: NaiveDate::from_ymd_opt(2023, 4, 19).unwrap(),
                    input_date: NaiveDate::from_ymd_opt(2023, 4, 20).unwrap(),
                    amount,
                    description: "test".to_string(),
                    typecode: "166".to_string(),
                    bank_code: None,
                    account_code: None,
                    partner_name: None,
                })
                .collect(),
        }
    }

    #[test]
    fn append_assigns_decreasing_negative_keys() {
        let config = ImportConfig::default();
        let mut set = ImportSet::new();

        set.append(&[statement("A", &[100]), statement("B", &[200])], "6200", "a.xml", &config);
        set.append(&[statement("C", &[300])], "6200", "b.xml", &config);

        let keys: Vec<i64> = set.statements.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec![-1, -2, -3]);

        // строки ссылаются на ключ своей выписки
        assert_eq!(set.rows_for(-2).count(), 1);
        assert_eq!(set.rows_for(-2).next().unwrap().amount, 200);
    }

    #[test]
    fn append_keeps_rows_in_file_order_with_positions() {
        let config = ImportConfig::default();
        let mut set = ImportSet::new();

        set.append(
            &[statement("A", &[500, -5000, 2000, -1000])],
            "6200",
            "a.xml",
            &config,
        );

        let rows: Vec<&ImportRow> = set.rows_for(-1).collect();
        let amounts: Vec<Amount> = rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![500, -5000, 2000, -1000]);

        let positions: Vec<u32> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 2, 1]);
    }

    #[test]
    fn append_flags_gift_candidates() {
        let config = ImportConfig::default();
        let mut set = ImportSet::new();

        let mut stmt = statement("A", &[100, 200]);
        stmt.transactions[0].typecode = "166".to_string();
        stmt.transactions[1].typecode = "020".to_string();

        set.append(&[stmt], "6200", "a.xml", &config);

        assert_eq!(set.rows[0].typecode, format!("166{GIFT_CANDIDATE_SUFFIX}"));
        assert_eq!(set.rows[1].typecode, "020");
    }

    #[test]
    fn append_substitutes_label_for_long_filenames() {
        let mut config = ImportConfig::default();
        config.bank_names.insert(
            "COBADEFFXXX/DE89370400440532013000".to_string(),
            "Main EUR".to_string(),
        );

        let long_name = format!("{}.xml", "x".repeat(STATEMENT_FILENAME_CAPACITY));
        let mut set = ImportSet::new();
        set.append(&[statement("A", &[100])], "6200", &long_name, &config);

        assert_eq!(set.statements[0].filename, "Main EUR");
    }

    #[test]
    fn append_falls_back_to_composite_account_key() {
        let config = ImportConfig::default();

        let long_name = format!("{}.xml", "x".repeat(STATEMENT_FILENAME_CAPACITY));
        let mut set = ImportSet::new();
        set.append(&[statement("A", &[100])], "6200", &long_name, &config);

        assert_eq!(
            set.statements[0].filename,
            "COBADEFFXXX/DE89370400440532013000"
        );
    }

    #[test]
    fn append_keeps_short_filename_verbatim() {
        let config = ImportConfig::default();
        let mut set = ImportSet::new();
        set.append(&[statement("A", &[100])], "6200", "EKK_230420.xml", &config);

        assert_eq!(set.statements[0].filename, "EKK_230420.xml");
    }

    #[test]
    fn append_copies_statement_fields() {
        let config = ImportConfig::default();
        let mut set = ImportSet::new();
        set.append(&[statement("STMT-1", &[100])], "6200", "a.xml", &config);

        let stored = &set.statements[0];
        assert_eq!(stored.id, "STMT-1");
        assert_eq!(stored.bank_account_code, "6200");
        assert_eq!(stored.bank_code, "COBADEFFXXX");
        assert_eq!(stored.account_code, "DE89370400440532013000");
        assert_eq!(stored.currency, "EUR");
        assert_eq!(stored.end_balance, 100);
    }
}
