//! Interactive numbered menu (`desk menu`).
//!
//! Every store or lookup error inside an action is printed and the loop
//! continues. Only I/O failures on the terminal end the session.

mod prompt;

use std::io::{BufRead, Write};

use desk_core::entities::Ticket;
use desk_core::enums::TicketStatus;
use desk_core::responses::LabeledTicket;

use crate::commands::shared::parse::parse_enum;
use crate::commands::ticket::create_in_category;
use crate::context::AppContext;

use prompt::Prompt;

const MAIN_MENU: [&str; 6] = [
    "Create a new ticket",
    "View all tickets",
    "Update ticket status",
    "Search tickets by category",
    "Search tickets by status",
    "Exit",
];

const EXIT: usize = 6;

/// Handle `desk menu` on the process terminal.
pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let input = std::io::BufReader::new(std::io::stdin());
    Menu::new(ctx, input, std::io::stdout()).run().await
}

pub struct Menu<'a, R, W> {
    ctx: &'a AppContext,
    prompt: Prompt<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub const fn new(ctx: &'a AppContext, input: R, out: W) -> Self {
        Self {
            ctx,
            prompt: Prompt::new(input, out),
        }
    }

    /// Loop until the operator exits or input ends.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            for (index, item) in MAIN_MENU.iter().enumerate() {
                writeln!(self.prompt.out(), "{}. {item}", index + 1)?;
            }
            let Some(answer) = self.prompt.line("Enter your choice: ")? else {
                return Ok(());
            };

            let choice = match prompt::parse_choice(&answer, MAIN_MENU.len()) {
                Ok(choice) => choice,
                Err(error) => {
                    writeln!(self.prompt.out(), "{error}. Please try again.")?;
                    continue;
                }
            };
            if choice == EXIT {
                return Ok(());
            }

            if let Err(error) = self.action(choice).await {
                if is_terminal_io(&error) {
                    return Err(error);
                }
                writeln!(self.prompt.out(), "Error: {error:#}")?;
            }
        }
    }

    async fn action(&mut self, choice: usize) -> anyhow::Result<()> {
        match choice {
            1 => self.create_ticket().await,
            2 => self.view_tickets().await,
            3 => self.update_status().await,
            4 => self.search_by_category().await,
            5 => self.search_by_status().await,
            _ => Ok(()),
        }
    }

    async fn create_ticket(&mut self) -> anyhow::Result<()> {
        let categories = self.ctx.service.queries().categories_for_selection().await?;
        if categories.is_empty() {
            writeln!(self.prompt.out(), "No categories available. Load a taxonomy first.")?;
            return Ok(());
        }

        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        let Some(picked) = self.prompt.choose(
            "Available categories:",
            &names,
            "Enter the number of the chosen category: ",
        )?
        else {
            return Ok(());
        };
        let category = match picked {
            Ok(index) => &categories[index],
            Err(error) => {
                writeln!(self.prompt.out(), "{error}. Ticket not created.")?;
                return Ok(());
            }
        };

        if category.issue_types.is_empty() {
            writeln!(
                self.prompt.out(),
                "Category '{}' has no issue types. Ticket not created.",
                category.name
            )?;
            return Ok(());
        }
        let Some(picked) = self.prompt.choose(
            &format!("Available issue types for {}:", category.name),
            &category.issue_types,
            "Enter the number of the chosen issue type: ",
        )?
        else {
            return Ok(());
        };
        let issue_type = match picked {
            Ok(index) => &category.issue_types[index],
            Err(error) => {
                writeln!(self.prompt.out(), "{error}. Ticket not created.")?;
                return Ok(());
            }
        };

        let Some(description) = self.prompt.line("Enter description: ")? else {
            return Ok(());
        };
        let ticket = create_in_category(self.ctx, category, issue_type, &description).await?;
        writeln!(self.prompt.out(), "Ticket created with ID: {}", ticket.id)?;
        Ok(())
    }

    async fn view_tickets(&mut self) -> anyhow::Result<()> {
        let tickets = self.ctx.service.queries().list_tickets_with_category().await?;
        self.print_labeled(&tickets)
    }

    async fn update_status(&mut self) -> anyhow::Result<()> {
        let Some(ticket_id) = self.prompt.line("Enter ticket ID: ")? else {
            return Ok(());
        };
        let labels = TicketStatus::ALL.map(TicketStatus::label);
        let Some(picked) = self.prompt.choose(
            "Choose new status:",
            &labels,
            "Enter the number of the new status: ",
        )?
        else {
            return Ok(());
        };
        let status = match picked {
            Ok(index) => TicketStatus::ALL[index],
            Err(error) => {
                writeln!(self.prompt.out(), "{error}. Status not updated.")?;
                return Ok(());
            }
        };

        self.ctx
            .service
            .tickets()
            .update_status(&ticket_id, status)
            .await?;
        writeln!(self.prompt.out(), "Ticket status updated.")?;
        Ok(())
    }

    async fn search_by_category(&mut self) -> anyhow::Result<()> {
        let Some(name) = self.prompt.line("Enter category: ")? else {
            return Ok(());
        };
        let tickets = self
            .ctx
            .service
            .queries()
            .list_tickets_by_category_name(&name)
            .await?;
        if tickets.is_empty() {
            writeln!(self.prompt.out(), "No tickets found for category '{name}'.")?;
            return Ok(());
        }
        for ticket in &tickets {
            self.print_ticket(ticket, &name)?;
        }
        Ok(())
    }

    async fn search_by_status(&mut self) -> anyhow::Result<()> {
        let Some(raw) = self.prompt.line("Enter status (Open, Pending, Closed): ")? else {
            return Ok(());
        };
        let status = parse_enum::<TicketStatus>(&raw, "status")?;
        let tickets = self
            .ctx
            .service
            .queries()
            .list_tickets_by_status(status)
            .await?;
        self.print_labeled(&tickets)
    }

    fn print_labeled(&mut self, tickets: &[LabeledTicket]) -> anyhow::Result<()> {
        if tickets.is_empty() {
            writeln!(self.prompt.out(), "No tickets found.")?;
        }
        for labeled in tickets {
            self.print_ticket(&labeled.ticket, &labeled.category)?;
        }
        Ok(())
    }

    fn print_ticket(&mut self, ticket: &Ticket, category: &str) -> anyhow::Result<()> {
        let out = self.prompt.out();
        writeln!(out, "Ticket ID: {}", ticket.id)?;
        writeln!(out, "Category: {category}")?;
        writeln!(out, "Issue Type: {}", ticket.issue_type)?;
        writeln!(out, "Description: {}", ticket.description)?;
        writeln!(out, "Status: {}", ticket.status.label())?;
        writeln!(out, "{}", "-".repeat(40))?;
        Ok(())
    }
}

/// Whether an action failed on the terminal itself rather than on the store.
fn is_terminal_io(error: &anyhow::Error) -> bool {
    error.downcast_ref::<std::io::Error>().is_some()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use desk_config::DeskConfig;
    use desk_core::taxonomy::Taxonomy;
    use desk_db::service::DeskService;

    use super::*;

    async fn context() -> AppContext {
        let service = DeskService::new_local(":memory:", None, None).await.unwrap();
        service
            .catalog()
            .replace_all(&Taxonomy::from_pairs([
                ("Network", vec!["Outage", "Slow"]),
                ("Billing", vec!["Refund"]),
            ]))
            .await
            .unwrap();
        AppContext {
            service,
            config: DeskConfig::default(),
        }
    }

    async fn session(ctx: &AppContext, input: &str) -> String {
        let mut out = Vec::new();
        Menu::new(ctx, Cursor::new(input.to_string()), &mut out)
            .run()
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn invalid_choices_reprompt_without_exiting() {
        let ctx = context().await;
        let out = session(&ctx, "9\nabc\n6\n").await;
        assert_eq!(out.matches("Invalid choice").count(), 2);
        assert_eq!(out.matches("Enter your choice: ").count(), 3);
    }

    #[tokio::test]
    async fn end_of_input_exits_cleanly() {
        let ctx = context().await;
        let out = session(&ctx, "").await;
        assert!(out.contains("1. Create a new ticket"));
    }

    #[tokio::test]
    async fn create_then_view() {
        let ctx = context().await;
        let out = session(&ctx, "1\n1\n2\nrouter slow\n2\n6\n").await;

        assert!(out.contains("Ticket created with ID: tkt-"));
        assert!(out.contains("Category: Network"));
        assert!(out.contains("Issue Type: Slow"));
        assert!(out.contains("Status: Open"));

        let tickets = ctx.service.tickets().find_all().await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].description, "router slow");
    }

    #[tokio::test]
    async fn out_of_range_category_creates_nothing() {
        let ctx = context().await;
        let out = session(&ctx, "1\n7\n6\n").await;
        assert!(out.contains("Ticket not created."));
        assert!(ctx.service.tickets().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_status_of_missing_ticket_reports_error() {
        let ctx = context().await;
        let out = session(&ctx, "3\ntkt-00000000\n2\n6\n").await;
        assert!(out.contains("Error: Entity not found: ticket tkt-00000000"));
        assert!(!out.contains("Ticket status updated."));
    }

    #[tokio::test]
    async fn update_status_and_search_by_status() {
        let ctx = context().await;
        let network = ctx.service.catalog().find_by_name("Network").await.unwrap().unwrap();
        let ticket = ctx
            .service
            .tickets()
            .create(&network.id, "Outage", "down")
            .await
            .unwrap();

        let input = format!("3\n{}\n3\n5\nclosed\n6\n", ticket.id);
        let out = session(&ctx, &input).await;
        assert!(out.contains("Ticket status updated."));
        assert!(out.contains("Status: Closed"));
    }

    #[tokio::test]
    async fn search_by_unknown_category_is_empty() {
        let ctx = context().await;
        let out = session(&ctx, "4\nPrinters\n6\n").await;
        assert!(out.contains("No tickets found for category 'Printers'."));
    }

    #[tokio::test]
    async fn invalid_status_search_is_not_fatal() {
        let ctx = context().await;
        let out = session(&ctx, "5\nDone\n6\n").await;
        assert!(out.contains("Error: invalid status 'Done'"));
    }
}
