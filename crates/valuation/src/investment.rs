use market_core::Company;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvestmentError {
    #[error("investment amount must be a finite, non-zero value")]
    InvalidAmount,
    #[error("no company at index {index}")]
    UnknownCompany { index: usize },
    #[error("insufficient balance: requested {requested:.2}, available {available:.2}")]
    InsufficientBalance { requested: f64, available: f64 },
    #[error("insufficient holding: requested {requested:.2}, held {held:.2}")]
    InsufficientHolding { requested: f64, held: f64 },
}

impl InvestmentError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "invalid_amount",
            Self::UnknownCompany { .. } => "unknown_company",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::InsufficientHolding { .. } => "insufficient_holding",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentReceipt {
    pub company: String,
    pub amount: f64,
    pub investment: f64,
    pub balance: f64,
}

/// Buys (`amount > 0`) or sells (`amount < 0`) into the company at `index`.
///
/// Validation happens before any mutation, so a rejected action leaves both
/// `companies` and the caller's balance untouched.
pub fn apply_investment(
    companies: &mut [Company],
    balance: f64,
    index: usize,
    amount: f64,
    label: String,
) -> Result<InvestmentReceipt, InvestmentError> {
    if !amount.is_finite() || amount == 0.0 {
        return Err(InvestmentError::InvalidAmount);
    }
    let company = companies
        .get_mut(index)
        .ok_or(InvestmentError::UnknownCompany { index })?;

    if amount > balance {
        return Err(InvestmentError::InsufficientBalance {
            requested: amount,
            available: balance,
        });
    }
    if -amount > company.investment {
        return Err(InvestmentError::InsufficientHolding {
            requested: -amount,
            held: company.investment,
        });
    }

    let previous = company.investment;
    let current = (previous + amount).max(0.0);
    let base = if previous == 0.0 { 1.0 } else { previous };
    let change_pct = (current - previous) / base * 100.0;
    company.record_change(current, change_pct, label);

    Ok(InvestmentReceipt {
        company: company.name.clone(),
        amount,
        investment: current,
        balance: balance - amount,
    })
}
