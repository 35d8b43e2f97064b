use chrono::NaiveDate;

/// Тип для денежных сумм в "копейках" валюты выписки, signed.
/// Положительная сумма - кредит, отрицательная - дебет.
pub type Amount = i64;

/// Одна банковская выписка, как она разобрана из CAMT-файла.
///
/// Заполняется целиком при парсинге и дальше по конвейеру только читается;
/// записи для сохранения строит отдельный слой ([`crate::import::ImportSet`]),
/// так что парсер ничего не знает о схеме хранения.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// идентификатор выписки, присвоенный банком
    /// (не уникален между юрлицами)
    pub id: String,
    /// BIC банка-владельца счёта
    pub bank_code: String,
    /// IBAN счёта-владельца
    pub account_code: String,
    /// имя владельца счёта, как его пишет банк
    pub account_name: String,
    /// код валюты ISO; все операции выписки обязаны быть в ней же
    pub currency: String,
    /// баланс PRCD (previously closed booked)
    pub start_balance: Amount,
    /// баланс CLBD (closing booked)
    pub end_balance: Amount,
    /// дата закрывающего баланса; именно она считается датой выписки,
    /// датам из имён файлов верить нельзя
    pub date: NaiveDate,
    /// операции в порядке следования в файле
    pub transactions: Vec<Transaction>,
}

/// Одна операция из выписки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// дата валютирования
    pub value_date: NaiveDate,
    /// дата проводки
    pub input_date: NaiveDate,
    /// сумма со знаком, в валюте выписки
    pub amount: Amount,
    /// текстовое описание (назначение платежа)
    pub description: String,
    /// код типа операции банка
    pub typecode: String,
    /// BIC банка контрагента
    pub bank_code: Option<String>,
    /// IBAN либо локальный номер счёта контрагента
    pub account_code: Option<String>,
    /// имя контрагента
    pub partner_name: Option<String>,
}
