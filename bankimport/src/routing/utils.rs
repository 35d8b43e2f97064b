use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Маркер типа выгрузки в имени сырого файла
pub(super) const EXPORT_MARKER: &str = "_C53_";

/// Минимальный шаблон имени сырой выгрузки:
/// дата, маркер, IBAN, валюта, суффикс банка
const RAW_NAME_TEMPLATE: &str = "2000-01-01_C53_DE00000000000000000000_EUR_1.xml";

static IBAN_RE: Lazy<Regex> = Lazy::new(|| {
    // ^[A-Z]{2} - 2 буквы страны
    // \d{2} - 2 контрольные цифры
    // [A-Z0-9]{11,30} - хвост
    Regex::new(r"^[A-Z]{2}\d{2}[A-Z0-9]{11,30}$").unwrap()
});

pub(super) fn is_raw_export_name(name: &str) -> bool {
    name.contains(EXPORT_MARKER) && name.len() >= RAW_NAME_TEMPLATE.len()
}

/// Предварительная дата из фиксированных позиций имени.
///
/// Банки заполняют её ненадёжно, настоящая дата берётся из содержимого.
pub(super) fn tentative_date(name: &str) -> Option<NaiveDate> {
    let raw = name.get(0..10)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Предварительный IBAN из фиксированных позиций имени
/// (историческая эвристика: 22 символа сразу после маркера).
pub(super) fn tentative_iban(name: &str) -> Option<String> {
    let raw = name.get(15..37)?;

    if IBAN_RE.is_match(raw) {
        Some(raw.to_string())
    } else {
        None
    }
}

/// Каноническое имя разложенного файла: `<метка>_<ггммдд>.xml`
pub(super) fn routed_name(label: &str, date: NaiveDate) -> String {
    format!("{label}_{}.xml", date.format("%y%m%d"))
}

/// Имя слота конца года: 31 декабря переданного года
pub(super) fn year_end_name(label: &str, year: i32) -> String {
    format!("{label}_{:02}1231.xml", year.rem_euclid(100))
}
