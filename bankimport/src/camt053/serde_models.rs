use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename = "Document")]
pub struct Camt053Document {
    /// атрибут xmlns корневого элемента; проверяется на camt.053.001.02
    #[serde(rename = "@xmlns")]
    pub xmlns: Option<String>,

    /// <BkToCstmrStmt>...</BkToCstmrStmt>
    #[serde(rename = "BkToCstmrStmt")]
    pub bank_to_customer: Camt053BankToCustomer,
}

#[derive(Debug, Default, Deserialize)]
pub struct Camt053BankToCustomer {
    /// <GrpHdr>...</GrpHdr>
    #[serde(rename = "GrpHdr")]
    pub group_header: Option<Camt053GroupHeader>,

    /// Все <Stmt>...</Stmt>
    #[serde(rename = "Stmt", default)]
    pub statements: Vec<Camt053Statement>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Camt053GroupHeader {
    /// <MsgId>...</MsgId>
    #[serde(rename = "MsgId")]
    pub message_id: String,

    /// <CreDtTm>2023-04-20T23:24:31</CreDtTm>
    #[serde(rename = "CreDtTm")]
    pub created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Camt053Statement {
    /// <Id>...</Id> - идентификатор выписки
    #[serde(rename = "Id")]
    pub id: Option<String>,

    /// <ElctrncSeqNb>1</ElctrncSeqNb>
    #[serde(rename = "ElctrncSeqNb")]
    pub sequence_number: Option<u32>,

    /// <Acct>...</Acct>
    #[serde(rename = "Acct")]
    pub account: Camt053Account,

    /// Все <Bal>...</Bal>
    #[serde(rename = "Bal", default)]
    pub balances: Vec<Camt053Balance>,

    /// Все <Ntry>...</Ntry>
    #[serde(rename = "Ntry", default)]
    pub entries: Vec<Camt053Entry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Camt053Account {
    /// <Acct><Id>
    #[serde(rename = "Id")]
    pub id: Camt053AccountId,

    /// <Acct><Ccy>EUR</Ccy></Acct>
    #[serde(rename = "Ccy")]
    pub currency: Option<String>,

    /// <Acct><Ownr><Nm>
    #[serde(rename = "Ownr")]
    pub owner: Option<CamtParty>,

    /// <Acct><Svcr>
    #[serde(rename = "Svcr")]
    pub servicer: Option<CamtServicer>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Camt053AccountId {
    /// <IBAN>
    #[serde(rename = "IBAN")]
    pub iban: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtServicer {
    #[serde(rename = "FinInstnId")]
    pub fin_instn_id: CamtFinInstnId,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtFinInstnId {
    /// <BIC>
    #[serde(rename = "BIC")]
    pub bic: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Camt053Balance {
    /// Тип баланса (PRCD / CLBD / ...).
    #[serde(rename = "Tp")]
    pub balance_type: Camt053BalanceType,

    /// <Amt Ccy="EUR">360000.00</Amt>
    #[serde(rename = "Amt")]
    pub amount: CamtAmtXml,

    /// <CdtDbtInd>CRDT</CdtDbtInd>
    #[serde(rename = "CdtDbtInd")]
    pub cdt_dbt_ind: Option<String>,

    /// <Dt><Dt>2023-04-19</Dt></Dt>
    #[serde(rename = "Dt")]
    pub date: Option<CamtDateXml>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Camt053BalanceType {
    /// <Tp><CdOrPrtry><Cd>PRCD</Cd></CdOrPrtry></Tp>
    #[serde(rename = "CdOrPrtry")]
    pub code_or_proprietary: Camt053BalanceCodeOrProprietary,
}

#[derive(Debug, Default, Deserialize)]
pub struct Camt053BalanceCodeOrProprietary {
    /// <Cd>PRCD</Cd> / <Cd>CLBD</Cd> и т.п.
    #[serde(rename = "Cd")]
    pub code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Camt053Entry {
    #[serde(rename = "Amt")]
    pub amount: CamtAmtXml,

    #[serde(rename = "CdtDbtInd")]
    pub cdt_dbt_ind: String,

    /// <Sts> - статус/код операции, идёт дальше в классификатор
    #[serde(rename = "Sts")]
    pub status: Option<String>,

    #[serde(rename = "BookgDt")]
    pub booking_date: CamtDateXml,

    #[serde(rename = "ValDt")]
    pub value_date: CamtDateXml,

    #[serde(rename = "NtryDtls")]
    pub details: Option<CamtEntryDetails>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtAmtXml {
    #[serde(rename = "@Ccy")]
    pub currency: String,

    #[serde(rename = "$text")]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtDateXml {
    #[serde(rename = "Dt")]
    pub date: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtEntryDetails {
    #[serde(rename = "TxDtls", default)]
    pub tx_details: Vec<CamtTxDtls>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtTxDtls {
    #[serde(rename = "RltdPties")]
    pub related_parties: Option<CamtRelatedParties>,

    #[serde(rename = "RltdAgts")]
    pub related_agents: Option<CamtRelatedAgents>,

    #[serde(rename = "RmtInf")]
    pub rmt_inf: Option<CamtRemittanceInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtRelatedParties {
    /// <Dbtr>
    #[serde(rename = "Dbtr")]
    pub debtor: Option<CamtParty>,

    /// <DbtrAcct>
    #[serde(rename = "DbtrAcct")]
    pub debtor_account: Option<CamtAccount>,

    /// <Cdtr>
    #[serde(rename = "Cdtr")]
    pub creditor: Option<CamtParty>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtRelatedAgents {
    /// <DbtrAgt>
    #[serde(rename = "DbtrAgt")]
    pub debtor_agent: Option<CamtAgent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtAgent {
    #[serde(rename = "FinInstnId")]
    pub fin_instn_id: CamtFinInstnId,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtParty {
    /// <Nm>
    #[serde(rename = "Nm")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtAccount {
    #[serde(rename = "Id")]
    pub id: Camt053AccountId,
}

#[derive(Debug, Default, Deserialize)]
pub struct CamtRemittanceInfo {
    /// <Ustrd>
    #[serde(rename = "Ustrd", default)]
    pub unstructured: Vec<String>,
}
