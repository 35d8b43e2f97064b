use super::serde_models::*;
use crate::error::ImportError;
use crate::model::{Amount, Transaction};
use crate::utils::signed_amount;
use chrono::NaiveDate;

pub(super) fn parse_camt_date(s: &str) -> Result<NaiveDate, ImportError> {
    // CAMT может прислать "2023-04-20" или "2023-04-20T23:59:59"
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    Err(ImportError::BadInput(format!("invalid CAMT date: {s}")))
}

fn balance_from_camt(bal: &Camt053Balance) -> Result<Amount, ImportError> {
    let ind = bal
        .cdt_dbt_ind
        .as_deref()
        .ok_or(ImportError::MissingField("Bal/CdtDbtInd"))?;

    signed_amount(&bal.amount.value, ind)
}

/// Вытаскивает балансы PRCD (открывающий) и CLBD (закрывающий) плюс дату
/// закрывающего баланса - она же дата выписки.
///
/// Прочие типы балансов (ITBD, CLAV, FWAV) чисто информационные, пропускаем.
pub(super) fn extract_balances(
    stmt: &Camt053Statement,
) -> Result<(Amount, Amount, NaiveDate), ImportError> {
    let mut start_balance: Amount = 0;
    let mut end_balance: Option<Amount> = None;
    let mut date: Option<NaiveDate> = None;

    for bal in &stmt.balances {
        let code = bal.balance_type.code_or_proprietary.code.as_deref();

        match code {
            Some("PRCD") => {
                start_balance = balance_from_camt(bal)?;
            }
            Some("CLBD") => {
                end_balance = Some(balance_from_camt(bal)?);
                let raw_date = bal
                    .date
                    .as_ref()
                    .ok_or(ImportError::MissingField("Bal[CLBD]/Dt/Dt"))?;
                date = Some(parse_camt_date(&raw_date.date)?);
            }
            _ => {}
        }
    }

    let end_balance = end_balance.ok_or(ImportError::MissingField("Bal[CLBD]"))?;
    let date = date.ok_or(ImportError::MissingField("Bal[CLBD]/Dt/Dt"))?;

    Ok((start_balance, end_balance, date))
}

/// Конвертирует один <Ntry> в операцию.
///
/// Валюта суммы обязана совпадать с валютой выписки: расхождение - это
/// испорченные данные, а не повод для предупреждения.
pub(super) fn transaction_from_entry(
    entry: &Camt053Entry,
    statement_currency: &str,
    owner_name: &str,
) -> Result<Transaction, ImportError> {
    if entry.amount.currency != statement_currency {
        return Err(ImportError::CurrencyMismatch {
            entry: entry.amount.currency.clone(),
            statement: statement_currency.to_string(),
        });
    }

    let amount = signed_amount(&entry.amount.value, &entry.cdt_dbt_ind)?;
    let input_date = parse_camt_date(&entry.booking_date.date)?;
    let value_date = parse_camt_date(&entry.value_date.date)?;

    let typecode = entry
        .status
        .as_deref()
        .ok_or(ImportError::MissingField("Ntry/Sts"))?
        .to_string();

    let tx_dtls = entry.details.as_ref().and_then(|d| d.tx_details.first());

    let mut description = String::new();
    let mut partner_name = None;
    let mut account_code = None;
    let mut bank_code = None;

    if let Some(tx) = tx_dtls {
        if let Some(rmt) = &tx.rmt_inf
            && !rmt.unstructured.is_empty()
        {
            description = rmt.unstructured.join("\n");
        }

        if let Some(parties) = &tx.related_parties {
            partner_name = parties.debtor.as_ref().and_then(|p| p.name.clone());
            account_code = parties
                .debtor_account
                .as_ref()
                .and_then(|acc| acc.id.iban.clone());

            // иногда отправители пишут проект/получателя в имя кредитора;
            // если оно отличается от имени владельца счёта, дописываем в описание
            if let Some(cdtr_name) = parties.creditor.as_ref().and_then(|p| p.name.as_deref())
                && cdtr_name != owner_name
            {
                if description.is_empty() {
                    description = cdtr_name.to_string();
                } else {
                    description.push(' ');
                    description.push_str(cdtr_name);
                }
            }
        }

        bank_code = tx
            .related_agents
            .as_ref()
            .and_then(|agts| agts.debtor_agent.as_ref())
            .and_then(|agt| agt.fin_instn_id.bic.clone());
    }

    Ok(Transaction {
        value_date,
        input_date,
        amount,
        description,
        typecode,
        bank_code,
        account_code,
        partner_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(code: &str, value: &str, ind: &str, date: Option<&str>) -> Camt053Balance {
        Camt053Balance {
            balance_type: Camt053BalanceType {
                code_or_proprietary: Camt053BalanceCodeOrProprietary {
                    code: Some(code.to_string()),
                },
            },
            amount: CamtAmtXml {
                currency: "EUR".to_string(),
                value: value.to_string(),
            },
            cdt_dbt_ind: Some(ind.to_string()),
            date: date.map(|d| CamtDateXml {
                date: d.to_string(),
            }),
        }
    }

    fn entry(value: &str, ind: &str) -> Camt053Entry {
        Camt053Entry {
            amount: CamtAmtXml {
                currency: "EUR".to_string(),
                value: value.to_string(),
            },
            cdt_dbt_ind: ind.to_string(),
            status: Some("166".to_string()),
            booking_date: CamtDateXml {
                date: "2023-04-20".to_string(),
            },
            value_date: CamtDateXml {
                date: "2023-04-21".to_string(),
            },
            details: None,
        }
    }

    // parse_camt_date

    #[test]
    fn parse_camt_date_handles_plain_date() {
        let d = parse_camt_date("2023-04-20").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 4, 20).unwrap());
    }

    #[test]
    fn parse_camt_date_handles_datetime() {
        let d = parse_camt_date("2023-04-20T23:59:59").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 4, 20).unwrap());
    }

    #[test]
    fn parse_camt_date_fails_on_invalid_string() {
        let err = parse_camt_date("not-a-date").unwrap_err();
        match err {
            ImportError::BadInput(msg) => {
                assert!(msg.contains("invalid CAMT date"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // extract_balances

    #[test]
    fn extract_balances_selects_start_and_end_by_code() {
        let stmt = Camt053Statement {
            balances: vec![
                balance("PRCD", "100.00", "CRDT", None),
                balance("CLBD", "250.00", "CRDT", Some("2023-04-19")),
            ],
            ..Default::default()
        };

        let (start, end, date) = extract_balances(&stmt).unwrap();

        assert_eq!(start, 10_000);
        assert_eq!(end, 25_000);
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 4, 19).unwrap());
    }

    #[test]
    fn extract_balances_debit_indicator_flips_sign() {
        let stmt = Camt053Statement {
            balances: vec![
                balance("PRCD", "100.00", "DBIT", None),
                balance("CLBD", "250.00", "DBIT", Some("2023-04-19")),
            ],
            ..Default::default()
        };

        let (start, end, _) = extract_balances(&stmt).unwrap();

        assert_eq!(start, -10_000);
        assert_eq!(end, -25_000);
    }

    #[test]
    fn extract_balances_ignores_informational_types() {
        let stmt = Camt053Statement {
            balances: vec![
                balance("ITBD", "999.99", "CRDT", None),
                balance("CLAV", "999.99", "CRDT", None),
                balance("CLBD", "250.00", "CRDT", Some("2023-04-19")),
            ],
            ..Default::default()
        };

        let (start, end, _) = extract_balances(&stmt).unwrap();

        // PRCD нет - открывающий по умолчанию ноль
        assert_eq!(start, 0);
        assert_eq!(end, 25_000);
    }

    #[test]
    fn extract_balances_requires_closing_balance() {
        let stmt = Camt053Statement {
            balances: vec![balance("PRCD", "100.00", "CRDT", None)],
            ..Default::default()
        };

        let err = extract_balances(&stmt).unwrap_err();
        assert!(matches!(err, ImportError::MissingField("Bal[CLBD]")));
    }

    #[test]
    fn extract_balances_requires_closing_balance_date() {
        let stmt = Camt053Statement {
            balances: vec![balance("CLBD", "250.00", "CRDT", None)],
            ..Default::default()
        };

        let err = extract_balances(&stmt).unwrap_err();
        assert!(matches!(err, ImportError::MissingField("Bal[CLBD]/Dt/Dt")));
    }

    // transaction_from_entry

    #[test]
    fn transaction_from_entry_credit_is_positive_debit_is_negative() {
        let credit = transaction_from_entry(&entry("12.34", "CRDT"), "EUR", "Owner").unwrap();
        assert_eq!(credit.amount, 1_234);

        let debit = transaction_from_entry(&entry("12.34", "DBIT"), "EUR", "Owner").unwrap();
        assert_eq!(debit.amount, -1_234);
    }

    #[test]
    fn transaction_from_entry_maps_dates_and_typecode() {
        let tx = transaction_from_entry(&entry("1.00", "CRDT"), "EUR", "Owner").unwrap();

        assert_eq!(tx.input_date, NaiveDate::from_ymd_opt(2023, 4, 20).unwrap());
        assert_eq!(tx.value_date, NaiveDate::from_ymd_opt(2023, 4, 21).unwrap());
        assert_eq!(tx.typecode, "166");
    }

    #[test]
    fn transaction_from_entry_fails_on_currency_mismatch() {
        let err = transaction_from_entry(&entry("1.00", "CRDT"), "USD", "Owner").unwrap_err();

        match err {
            ImportError::CurrencyMismatch { entry, statement } => {
                assert_eq!(entry, "EUR");
                assert_eq!(statement, "USD");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn transaction_from_entry_extracts_debtor_side() {
        let mut e = entry("5.00", "CRDT");
        e.details = Some(CamtEntryDetails {
            tx_details: vec![CamtTxDtls {
                related_parties: Some(CamtRelatedParties {
                    debtor: Some(CamtParty {
                        name: Some("John Doe".to_string()),
                    }),
                    debtor_account: Some(CamtAccount {
                        id: Camt053AccountId {
                            iban: Some("DE89370400440532013000".to_string()),
                        },
                    }),
                    creditor: None,
                }),
                related_agents: Some(CamtRelatedAgents {
                    debtor_agent: Some(CamtAgent {
                        fin_instn_id: CamtFinInstnId {
                            bic: Some("COBADEFFXXX".to_string()),
                        },
                    }),
                }),
                rmt_inf: Some(CamtRemittanceInfo {
                    unstructured: vec!["Line 1".to_string(), "Line 2".to_string()],
                }),
            }],
        });

        let tx = transaction_from_entry(&e, "EUR", "Owner").unwrap();

        assert_eq!(tx.partner_name.as_deref(), Some("John Doe"));
        assert_eq!(tx.account_code.as_deref(), Some("DE89370400440532013000"));
        assert_eq!(tx.bank_code.as_deref(), Some("COBADEFFXXX"));
        assert_eq!(tx.description, "Line 1\nLine 2");
    }

    #[test]
    fn transaction_from_entry_appends_foreign_creditor_name() {
        let mut e = entry("5.00", "CRDT");
        e.details = Some(CamtEntryDetails {
            tx_details: vec![CamtTxDtls {
                related_parties: Some(CamtRelatedParties {
                    debtor: None,
                    debtor_account: None,
                    creditor: Some(CamtParty {
                        name: Some("Project Hope".to_string()),
                    }),
                }),
                related_agents: None,
                rmt_inf: Some(CamtRemittanceInfo {
                    unstructured: vec!["Donation".to_string()],
                }),
            }],
        });

        let tx = transaction_from_entry(&e, "EUR", "Our Charity").unwrap();
        assert_eq!(tx.description, "Donation Project Hope");
    }

    #[test]
    fn transaction_from_entry_skips_creditor_name_equal_to_owner() {
        let mut e = entry("5.00", "CRDT");
        e.details = Some(CamtEntryDetails {
            tx_details: vec![CamtTxDtls {
                related_parties: Some(CamtRelatedParties {
                    debtor: None,
                    debtor_account: None,
                    creditor: Some(CamtParty {
                        name: Some("Our Charity".to_string()),
                    }),
                }),
                related_agents: None,
                rmt_inf: Some(CamtRemittanceInfo {
                    unstructured: vec!["Donation".to_string()],
                }),
            }],
        });

        let tx = transaction_from_entry(&e, "EUR", "Our Charity").unwrap();
        assert_eq!(tx.description, "Donation");
    }

    #[test]
    fn transaction_from_entry_requires_status() {
        let mut e = entry("5.00", "CRDT");
        e.status = None;

        let err = transaction_from_entry(&e, "EUR", "Owner").unwrap_err();
        assert!(matches!(err, ImportError::MissingField("Ntry/Sts")));
    }
}
