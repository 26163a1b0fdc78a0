//! Prompt construction.

use crate::records::Transaction;

/// Builds the advisor prompt embedding `transactions` as pretty JSON.
///
/// Each transaction carries `description`, `amount`, `type`, `category` and
/// `transaction_date`.
///
/// # Errors
///
/// Returns the serialization error if the transactions cannot be rendered.
pub fn analysis_prompt(transactions: &[Transaction]) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string_pretty(transactions)?;
    Ok(format!(
        "You are 'Financial AI', an expert and friendly financial advisor.\n\
         Analyze the following transactions from a user and give them a clear summary, \
         one key observation and one practical tip.\n\
         Keep an encouraging, approachable tone.\n\
         \n\
         Transaction data:\n\
         ```json\n\
         {data}\n\
         ```\n"
    ))
}
