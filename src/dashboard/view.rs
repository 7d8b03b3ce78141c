//! Renders the dashboard page: three balance cards and the transactions table.

use maud::{Markup, html};

use crate::{
    Error,
    dashboard::state::ViewState,
    endpoints,
    header::Header,
    html::{PAGE_CLASS, base, error_alert},
    normalize::{DisplayBalance, DisplayTransaction},
};

const CARD_CLASS: &str = "card";
const TOTAL_CARD_CLASS: &str = "card card-total";

/// A summary card bound to one field of the balance.
struct Card<'a> {
    label: &'a str,
    icon: &'a str,
    icon_alt: &'a str,
    test_id: &'a str,
    amount: &'a str,
    is_total: bool,
}

impl Card<'_> {
    fn into_html(self) -> Markup {
        let class = if self.is_total {
            TOTAL_CARD_CLASS
        } else {
            CARD_CLASS
        };

        html!(
            div class=(class)
            {
                header class="card-header"
                {
                    p { (self.label) }
                    img src=(self.icon) alt=(self.icon_alt);
                }

                h1 data-testid=(self.test_id) class="card-amount"
                {
                    (self.amount)
                }
            }
        )
    }
}

fn cards_view(balance: Option<&DisplayBalance>) -> Markup {
    let (income, outcome, total) = match balance {
        Some(balance) => (
            balance.income.as_str(),
            balance.outcome.as_str(),
            balance.total.as_str(),
        ),
        None => ("", "", ""),
    };

    let cards = [
        Card {
            label: "Entradas",
            icon: endpoints::INCOME_ICON,
            icon_alt: "Income",
            test_id: "balance-income",
            amount: income,
            is_total: false,
        },
        Card {
            label: "Saídas",
            icon: endpoints::OUTCOME_ICON,
            icon_alt: "Outcome",
            test_id: "balance-outcome",
            amount: outcome,
            is_total: false,
        },
        Card {
            label: "Total",
            icon: endpoints::TOTAL_ICON,
            icon_alt: "Total",
            test_id: "balance-total",
            amount: total,
            is_total: true,
        },
    ];

    html!(
        section id="cards" class="cards"
        {
            @for card in cards {
                (card.into_html())
            }
        }
    )
}

fn transactions_table(transactions: &[DisplayTransaction]) -> Markup {
    let table_row = |transaction: &DisplayTransaction| {
        html!(
            tr
            {
                td class="title" { (transaction.title) }
                td class=(transaction.type_.as_str()) { (transaction.formatted_value) }
                td { (transaction.category.title) }
                td { (transaction.formatted_date) }
            }
        )
    };

    html!(
        section id="transactions" class="transactions"
        {
            table
            {
                thead
                {
                    tr
                    {
                        th scope="col" { "Título" }
                        th scope="col" { "Preço" }
                        th scope="col" { "Categoria" }
                        th scope="col" { "Data" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (table_row(transaction))
                    }
                }
            }
        }
    )
}

/// The alert shown in place of the data when loading failed.
fn failure_alert(error: &Error) -> Markup {
    let message = match error {
        Error::ApiRequest(_) | Error::ApiStatus(_) | Error::InvalidResponse(_) => {
            "Could not load your transactions."
        }
        _ => "Could not display your transactions.",
    };

    error_alert(message, &format!("{error}. Check the server logs for more details."))
}

/// Render the whole dashboard page for `state`.
///
/// [ViewState::Loading] renders blank cards and an empty table.
/// [ViewState::Failed] renders the same plus an alert describing the error.
pub(super) fn dashboard_view(state: &ViewState, language: &str) -> Markup {
    let header = Header::new(endpoints::DASHBOARD_VIEW).into_html();

    let (alert, balance, transactions) = match state {
        ViewState::Loading => (None, None, &[][..]),
        ViewState::Loaded(dashboard) => (
            None,
            Some(&dashboard.balance),
            dashboard.transactions.as_slice(),
        ),
        ViewState::Failed(error) => (Some(failure_alert(error)), None, &[][..]),
    };

    let content = html!(
        (header)

        main class=(PAGE_CLASS)
        {
            @if let Some(alert) = alert {
                (alert)
            }

            (cards_view(balance))

            (transactions_table(transactions))
        }
    );

    base("Dashboard", language, &content)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use scraper::{ElementRef, Html, Selector};

    use crate::{
        Error,
        api::{Category, TransactionType},
        dashboard::{state::ViewState, view::dashboard_view},
        normalize::{Dashboard, DisplayBalance, DisplayTransaction},
        test_utils::assert_valid_html,
    };

    fn display_transaction(
        id: &str,
        title: &str,
        type_: TransactionType,
        formatted_value: &str,
    ) -> DisplayTransaction {
        DisplayTransaction {
            id: id.to_owned(),
            title: title.to_owned(),
            value: 0.0,
            type_,
            category: Category {
                title: "Job".to_owned(),
            },
            created_at: "2020-05-01T00:00:00.000Z".to_owned(),
            formatted_value: formatted_value.to_owned(),
            formatted_date: "05/01/2020".to_owned(),
        }
    }

    fn loaded(transactions: Vec<DisplayTransaction>) -> ViewState {
        ViewState::Loaded(Dashboard {
            transactions,
            balance: DisplayBalance {
                income: "$5,000.00".to_owned(),
                outcome: "$1,200.00".to_owned(),
                total: "$3,800.00".to_owned(),
            },
        })
    }

    #[test]
    fn renders_balance_cards() {
        let rendered = dashboard_view(&loaded(vec![]), "en-US").into_string();

        let html = Html::parse_document(&rendered);
        assert_valid_html(&html);
        assert_eq!(must_get_card_text(&html, "balance-income"), "$5,000.00");
        assert_eq!(must_get_card_text(&html, "balance-outcome"), "$1,200.00");
        assert_eq!(must_get_card_text(&html, "balance-total"), "$3,800.00");
    }

    #[test]
    fn renders_one_row_per_transaction() {
        let transactions = vec![
            display_transaction("1", "Salary", TransactionType::Income, "$5,000.00"),
            display_transaction("2", "Rent", TransactionType::Outcome, "- $1,200.00"),
        ];

        let rendered = dashboard_view(&loaded(transactions.clone()), "en-US").into_string();

        let html = Html::parse_document(&rendered);
        assert_valid_html(&html);
        assert_table_contains_transactions(&html, &transactions);
    }

    #[test]
    fn highlights_only_the_total_card() {
        let rendered = dashboard_view(&loaded(vec![]), "en-US").into_string();

        let html = Html::parse_document(&rendered);
        let selector = Selector::parse(".card-total h1[data-testid]").unwrap();
        let highlighted: Vec<_> = html
            .select(&selector)
            .filter_map(|card| card.value().attr("data-testid"))
            .collect();

        assert_eq!(highlighted, ["balance-total"]);
    }

    #[test]
    fn amount_cells_are_classed_by_transaction_type() {
        let transactions = vec![
            display_transaction("1", "Salary", TransactionType::Income, "$5,000.00"),
            display_transaction("2", "Rent", TransactionType::Outcome, "- $1,200.00"),
        ];

        let rendered = dashboard_view(&loaded(transactions), "en-US").into_string();

        let html = Html::parse_document(&rendered);
        let income = Selector::parse("tbody td.income").unwrap();
        let outcome = Selector::parse("tbody td.outcome").unwrap();
        let text = |selector: &Selector| -> Vec<String> {
            html.select(selector)
                .map(|cell| cell.text().collect::<String>().trim().to_owned())
                .collect()
        };
        assert_eq!(text(&income), ["$5,000.00"]);
        assert_eq!(text(&outcome), ["- $1,200.00"]);
    }

    #[test]
    fn every_class_is_defined_in_stylesheet() {
        let stylesheet = include_str!("../../static/main.css");
        let transactions = vec![
            display_transaction("1", "Salary", TransactionType::Income, "$5,000.00"),
            display_transaction("2", "Rent", TransactionType::Outcome, "- $1,200.00"),
        ];
        let pages = [
            dashboard_view(&loaded(transactions), "en-US").into_string(),
            dashboard_view(&ViewState::Failed(Error::ApiStatus(500)), "en-US").into_string(),
        ];

        let selector = Selector::parse("[class]").unwrap();
        for page in pages {
            let html = Html::parse_document(&page);
            for class in html.select(&selector).flat_map(|element| element.value().classes()) {
                assert!(
                    stylesheet.contains(&format!(".{class}")),
                    "class {class:?} is not defined in main.css"
                );
            }
        }
    }

    #[test]
    fn renders_localized_column_headers() {
        let rendered = dashboard_view(&loaded(vec![]), "en-US").into_string();

        let html = Html::parse_document(&rendered);
        let selector = Selector::parse("thead th").unwrap();
        let headers: Vec<String> = html
            .select(&selector)
            .map(|header| header.text().collect::<String>().trim().to_owned())
            .collect();

        assert_eq!(headers, ["Título", "Preço", "Categoria", "Data"]);
    }

    #[test]
    fn loading_state_renders_blank_cards_and_no_rows() {
        let rendered = dashboard_view(&ViewState::Loading, "en-US").into_string();

        let html = Html::parse_document(&rendered);
        assert_valid_html(&html);
        assert_eq!(must_get_card_text(&html, "balance-income"), "");
        assert_eq!(must_get_card_text(&html, "balance-outcome"), "");
        assert_eq!(must_get_card_text(&html, "balance-total"), "");
        assert_eq!(count_table_rows(&html), 0);
        assert!(find_alert(&html).is_none(), "want no alert while loading");
    }

    #[test]
    fn failed_state_renders_alert_and_no_rows() {
        let state = ViewState::Failed(Error::ApiStatus(500));

        let rendered = dashboard_view(&state, "en-US").into_string();

        let html = Html::parse_document(&rendered);
        assert_valid_html(&html);
        assert_eq!(count_table_rows(&html), 0);
        assert_eq!(must_get_card_text(&html, "balance-total"), "");
        let alert = find_alert(&html).expect("Could not find alert");
        let alert_text = alert.text().collect::<String>();
        assert!(
            alert_text.contains("Could not load your transactions."),
            "'{alert_text}' does not mention the failed load"
        );
        assert!(
            alert_text.contains("status 500"),
            "'{alert_text}' does not mention the status code"
        );
    }

    #[test]
    fn sets_page_language() {
        let rendered = dashboard_view(&ViewState::Loading, "pt-BR").into_string();

        let html = Html::parse_document(&rendered);
        let selector = Selector::parse("html").unwrap();
        let root = html.select(&selector).next().expect("Could not find html element");

        assert_eq!(root.value().attr("lang"), Some("pt-BR"));
    }

    #[track_caller]
    fn must_get_card_text(html: &Html, test_id: &str) -> String {
        let selector = Selector::parse(&format!("h1[data-testid='{test_id}']")).unwrap();
        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("Could not find card with data-testid={test_id}"))
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    fn count_table_rows(html: &Html) -> usize {
        let selector = Selector::parse("table tbody tr").unwrap();
        html.select(&selector).count()
    }

    fn find_alert(html: &Html) -> Option<ElementRef<'_>> {
        let selector = Selector::parse("[role='alert']").unwrap();
        html.select(&selector).next()
    }

    #[track_caller]
    fn assert_table_contains_transactions(html: &Html, transactions: &[DisplayTransaction]) {
        let row_selector = Selector::parse("table tbody tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();
        let rows: Vec<ElementRef<'_>> = html.select(&row_selector).collect();

        assert_eq!(
            rows.len(),
            transactions.len(),
            "want {} table rows, got {}",
            transactions.len(),
            rows.len()
        );

        for (row, (table_row, want)) in zip(rows, transactions).enumerate() {
            let cells: Vec<ElementRef<'_>> = table_row.select(&cell_selector).collect();
            assert_eq!(
                4,
                cells.len(),
                "Want 4 table cells <td> in table row {row}, got {}",
                cells.len()
            );
            let text = |cell: &ElementRef<'_>| cell.text().collect::<String>().trim().to_owned();

            assert_eq!(text(&cells[0]), want.title, "wrong title in row {row}");
            assert_eq!(
                text(&cells[1]),
                want.formatted_value,
                "wrong value in row {row}"
            );
            assert_eq!(
                text(&cells[2]),
                want.category.title,
                "wrong category in row {row}"
            );
            assert_eq!(
                text(&cells[3]),
                want.formatted_date,
                "wrong date in row {row}"
            );

            let value_class = cells[1].value().attr("class").unwrap_or_default();
            assert!(
                value_class
                    .split_whitespace()
                    .any(|class| class == want.type_.as_str()),
                "want value cell in row {row} to have class {:?}, got {value_class:?}",
                want.type_.as_str()
            );
        }
    }
}
