use crate::api::sinpe::Gateway;
use crate::utils::SinpeError;

use super::Session;

pub async fn execute<G: Gateway>(session: &Session<G>, args: &[&str]) -> Result<String, SinpeError> {
    let term = args.join(" ");
    let groups = session.contacts.grouped(&term);

    if groups.is_empty() {
        return Ok(if term.is_empty() {
            "No contacts in your address book.".to_string()
        } else {
            format!("No contacts match `{}`.", term)
        });
    }

    let shown: usize = groups.iter().map(|g| g.contacts.len()).sum();
    let mut output = format!("👥 Contacts ({} of {})\n", shown, session.contacts.len());
    for group in groups {
        output.push_str(&format!("\n{}\n", group.letter));
        for contact in &group.contacts {
            output.push_str(&format!("  [{}] {}", contact.id, contact.full_name()));
            if let Some(phone) = contact.phone_numbers.first() {
                output.push_str(&format!("  {}", phone.number));
                if !phone.label.is_empty() {
                    output.push_str(&format!(" ({})", phone.label));
                }
            }
            output.push('\n');
        }
    }
    output.push_str("\nUse `send <contact-id> <amount> [detail]` to transfer.");

    Ok(output)
}
