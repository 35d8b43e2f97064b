use crate::error::ImportError;
use crate::model::Amount;

pub(crate) fn parse_amount(raw: &str) -> Result<u64, ImportError> {
    let mut cleaned = raw.trim().replace(' ', "");

    if raw.contains(',') {
        if raw.contains('.') {
            cleaned = cleaned.replace(',', "");
        } else {
            cleaned = cleaned.replace(',', ".");
        }
    }

    if cleaned.is_empty() {
        return Err(ImportError::InvalidAmount("empty amount".into()));
    }
    if cleaned.starts_with('-') {
        return Err(ImportError::InvalidAmount(format!(
            "negative amount: {cleaned}"
        )));
    }

    let mut split = cleaned.split('.');
    // cleaned точно не пусто, так что ошибки здесь быть не может
    let int_part = split.next().unwrap();
    let dec_part = split.next().unwrap_or("");
    if split.next().is_some() {
        // больше одной точки - странный формат
        return Err(ImportError::InvalidAmount(format!(
            "too many dots in amount: {cleaned}"
        )));
    }

    let int_part: u64 = int_part.parse()?;

    let dec_part: u64 = match dec_part.len() {
        0 => 0,
        1 => {
            let d = dec_part
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .ok_or_else(|| {
                    ImportError::InvalidAmount(format!("invalid fractional part: {cleaned}"))
                })?;
            d as u64 * 10
        }
        2 => dec_part.parse()?,
        _ => {
            return Err(ImportError::InvalidAmount(format!(
                "too many fractional digits in amount: {cleaned}"
            )));
        }
    };

    Ok(int_part * 100 + dec_part)
}

/// Сумма со знаком по индикатору CRDT/DBIT
pub(crate) fn signed_amount(raw: &str, cdt_dbt_ind: &str) -> Result<Amount, ImportError> {
    let minor = parse_amount(raw)? as Amount;

    match cdt_dbt_ind {
        "CRDT" => Ok(minor),
        "DBIT" => Ok(-minor),
        other => Err(ImportError::InvalidDirection(format!(
            "unknown CdtDbtInd: {other}"
        ))),
    }
}
