use super::{GIFT_CANDIDATE_SUFFIX, ImportRow};

/// Коды типов операций (GVC), типичные для пожертвований:
/// переводы-зачисления, дарственные постоянные поручения/прямые списания,
/// разовая проводка пожертвования, SEPA-перевод и SEPA-пожертвование.
const GIFT_TYPECODES: [&str; 10] = [
    "051", "052", "053", "067", "068", "069", "119", "152", "166", "169",
];

/// Срезает ведущие нули; не-числовые коды (IBAN, BIC) возвращает как есть.
pub(super) fn without_leading_zeros(code: &str) -> String {
    match code.parse::<i64>() {
        Ok(number) => number.to_string(),
        Err(_) => code.to_string(),
    }
}

/// Нормализованные идентификаторы счёта контрагента.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct AccountIdents {
    pub iban: String,
    pub bic: String,
    pub branch_code: String,
    pub account_number: String,
}

/// Раскладывает код счёта контрагента на идентификаторы.
///
/// Код с заглавной буквы в начале - это IBAN: хранится как есть, плюс из
/// него выводятся код банка (символы 5..12) и номер счёта (символы 13..)
/// без ведущих нулей. Иначе код считается локальным номером счёта,
/// IBAN и BIC остаются пустыми.
///
/// Кривые коды не отбраковываются - строка всё равно импортируема,
/// дальше её посмотрят руками.
pub(super) fn normalize_account(
    bank_code: Option<&str>,
    account_code: Option<&str>,
) -> AccountIdents {
    let code = account_code.unwrap_or("");
    let bank = bank_code.unwrap_or("");

    if code.starts_with(|c: char| c.is_ascii_uppercase()) {
        AccountIdents {
            iban: code.to_string(),
            bic: bank.to_string(),
            branch_code: code.get(4..12).map(without_leading_zeros).unwrap_or_default(),
            account_number: code.get(12..).map(without_leading_zeros).unwrap_or_default(),
        }
    } else {
        AccountIdents {
            iban: String::new(),
            bic: String::new(),
            branch_code: without_leading_zeros(bank),
            account_number: without_leading_zeros(code),
        }
    }
}

/// Помечает кандидата в пожертвования по коду типа операции.
///
/// Пометка ничего не фильтрует и сумму не трогает, она только подсказка
/// для последующего сопоставления с донорами.
pub(super) fn flag_gift_candidate(typecode: &str) -> String {
    if GIFT_TYPECODES.contains(&typecode) {
        format!("{typecode}{GIFT_CANDIDATE_SUFFIX}")
    } else {
        typecode.to_string()
    }
}

/// Проставляет строкам номер на бумажной выписке.
///
/// Банк печатает дебетовые операции в обратном порядке, а кредитовые под
/// ними в прямом: сортируем по сумме по возрастанию (при равенстве - по
/// порядку в файле), отрицательные нумеруем вниз от их количества,
/// после первой неотрицательной начинаем заново с единицы вверх.
/// Номера по разные стороны от нуля намеренно могут совпадать.
pub(super) fn assign_positions(rows: &mut [ImportRow]) {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by_key(|&i| rows[i].amount);

    let negatives = order.iter().filter(|&&i| rows[i].amount < 0).count();

    let mut down = negatives as u32;
    let mut up = 0u32;

    for &i in &order {
        if rows[i].amount < 0 {
            rows[i].position = down;
            down -= 1;
        } else {
            up += 1;
            rows[i].position = up;
        }
    }
}
