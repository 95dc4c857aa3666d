use crate::error::{AdvisorError, AdvisorResult};

fn ensure_non_negative(name: &str, value: f64) -> AdvisorResult<()> {
    if value < 0.0 || !value.is_finite() {
        return Err(AdvisorError::InvalidValue(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Share of the final pot the caller contributes: `to_call / (pot + to_call)`.
/// Zero when there is nothing to call or nothing in the pot.
pub fn pot_odds(to_call: f64, pot: f64) -> AdvisorResult<f64> {
    ensure_non_negative("To-call amount", to_call)?;
    ensure_non_negative("Pot", pot)?;
    if to_call == 0.0 || pot == 0.0 {
        return Ok(0.0);
    }
    Ok(to_call / (pot + to_call))
}

/// How many times over the call can be won back: `(pot + stack) / to_call`.
pub fn implied_odds(to_call: f64, pot: f64, effective_stack: f64) -> AdvisorResult<f64> {
    if to_call <= 0.0 {
        return Err(AdvisorError::InvalidValue(
            "To-call amount must be positive".to_string(),
        ));
    }
    ensure_non_negative("Pot", pot)?;
    ensure_non_negative("Stack", effective_stack)?;
    Ok((pot + effective_stack) / to_call)
}

/// Equity required to continue, discounted by implied odds.
pub fn required_equity(pot_odds: f64, implied_odds: f64) -> AdvisorResult<f64> {
    if implied_odds <= 0.0 {
        return Err(AdvisorError::InvalidValue(
            "Implied odds must be positive".to_string(),
        ));
    }
    Ok(pot_odds / implied_odds)
}

pub fn should_continue(equity: f64, pot_odds: f64, implied_odds: f64) -> AdvisorResult<bool> {
    Ok(equity > required_equity(pot_odds, implied_odds)?)
}
