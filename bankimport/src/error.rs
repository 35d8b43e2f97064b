use quick_xml::de::DeError;
use std::io::Error as IoError;
use thiserror::Error;

/// Ошибки при импорте банковских выписок
#[derive(Debug, Error)]
pub enum ImportError {
    // обёртки

    /// обёртка quick_xml::de::DeError
    #[error("xml deserialization error: {0}")]
    XmlDe(#[from] DeError),

    /// обёртка std::io::Error
    #[error("io error: {0}")]
    Io(#[from] IoError),

    /// обёртка std::num::ParseIntError
    #[error("number parse error: {0}")]
    Int(#[from] std::num::ParseIntError),

    /// обёртка toml::de::Error
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),

    // логические ошибки

    /// пространство имён документа не camt.053.001.02
    #[error("unsupported statement format, xmlns is {0:?}")]
    UnsupportedFormat(Option<String>),

    /// файл не разобран: нет обязательного узла или битое значение;
    /// имя файла и исходная причина сохраняются для диагностики
    #[error("problem with file {file}: {source}")]
    MalformedDocument {
        file: String,
        #[source]
        source: Box<ImportError>,
    },

    /// валюта операции не совпадает с валютой выписки
    #[error("currency mismatch: entry is in {entry}, statement is in {statement}")]
    CurrencyMismatch { entry: String, statement: String },

    /// нет обязательного параметра конфигурации
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// ошибка при парсинге денежной суммы
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// ошибка при парсинге направления (CRDT/DBIT)
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// ошибка отсутствия обязательного узла
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// очень общая ошибка плохих входных данных
    #[error("bad input: {0}")]
    BadInput(String),
}
