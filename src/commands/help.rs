pub fn execute() -> String {
    [
        "📖 SINPE móvil",
        "",
        "💰 Account",
        "  balance                          - Show your available balance",
        "",
        "👥 Contacts",
        "  contacts [search]                - List contacts, filtered by name or number",
        "",
        "💸 Transfers",
        "  send <contact-id> <amount> [detail] - Send money to a contact (e.g. `send 1 ₡2.000 almuerzo`)",
        "",
        "📋 Movements",
        "  history                          - Show your movements",
        "  more                             - Load older movements",
        "  detail <transaction-id>          - Show one movement",
        "",
        "  exit                             - Leave",
    ]
    .join("\n")
}
