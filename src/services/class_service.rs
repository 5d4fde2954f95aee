//! Class Service - booking rules on top of ClassRepository
//!
//! Everything here is store-agnostic: the repository does the persistence
//! (and the atomic booking), this module does validation and the in-memory
//! post-processing of fetched classes.

use chrono::NaiveDate;

use crate::domain::{
    Class, ClassFilter, ClassRepository, ClassWithClients, ClassWithCompany, Client,
    ConsultRepository, CreateClassInput, DomainError, ScheduledItem, Service, UpdateClassInput,
};

pub const CANCELLED_MESSAGE: &str = "Class cancelled successfully";

/// Query parameters for listing a company's classes
#[derive(Debug, Default, Clone)]
pub struct FindAllClassesQuery {
    pub company_id: String,
    pub date: Option<String>,
    pub client_identification: Option<String>,
    /// Keep only classes with at least one booked client
    pub booked_classes: bool,
}

/// Parse a calendar date and return it zero-padded as `YYYY-MM-DD`
///
/// Dates are stored and range-compared as text, so every date entering the
/// store or a filter goes through here first.
pub(crate) fn normalize_date(date: &str) -> Result<String, DomainError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| DomainError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", date)))
}

fn validate_timestamp(ts: &str) -> Result<(), DomainError> {
    ts.trim()
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| DomainError::Validation(format!("Invalid dateTimestamp '{}'", ts)))
}

fn validate_lots(lots: i32) -> Result<(), DomainError> {
    if lots < 0 {
        return Err(DomainError::Validation(
            "lots cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Keep only classes that somebody booked
pub fn only_booked(classes: Vec<ClassWithClients>) -> Vec<ClassWithClients> {
    classes
        .into_iter()
        .filter(|c| !c.clients.is_empty())
        .collect()
}

/// Pick the class with the smallest numeric `date_timestamp`
///
/// On equal timestamps the first one encountered wins. Timestamps that do
/// not parse lose against any that do.
pub fn earliest_class<I>(classes: I) -> Option<Class>
where
    I: IntoIterator<Item = Class>,
{
    let mut best: Option<(Option<i64>, Class)> = None;

    for class in classes {
        let key = class.date_timestamp.trim().parse::<i64>().ok();
        let replace = match &best {
            None => true,
            Some((best_key, _)) => match (key, *best_key) {
                (Some(k), Some(b)) => k < b,
                (Some(_), None) => true,
                _ => false,
            },
        };
        if replace {
            best = Some((key, class));
        }
    }

    best.map(|(_, class)| class)
}

/// Services first, then classes
pub fn merge_schedule(services: Vec<Service>, classes: Vec<ClassWithCompany>) -> Vec<ScheduledItem> {
    services
        .into_iter()
        .map(ScheduledItem::Service)
        .chain(classes.into_iter().map(ScheduledItem::Class))
        .collect()
}

pub async fn create_class(
    repo: &dyn ClassRepository,
    mut input: CreateClassInput,
) -> Result<Class, DomainError> {
    input.date = normalize_date(&input.date)?;
    validate_timestamp(&input.date_timestamp)?;
    validate_lots(input.lots)?;

    let class = repo.create(input).await?;
    tracing::info!("Created class {} for company {}", class.id, class.company_id);
    Ok(class)
}

pub async fn update_class(
    repo: &dyn ClassRepository,
    id: &str,
    mut input: UpdateClassInput,
) -> Result<Class, DomainError> {
    if let Some(date) = input.date.take() {
        input.date = Some(normalize_date(&date)?);
    }
    if let Some(ts) = &input.date_timestamp {
        validate_timestamp(ts)?;
    }
    if let Some(lots) = input.lots {
        validate_lots(lots)?;
    }

    repo.update(id, input).await
}

pub async fn delete_class(repo: &dyn ClassRepository, id: &str) -> Result<(), DomainError> {
    repo.delete(id).await?;
    tracing::info!("Deleted class {}", id);
    Ok(())
}

pub async fn find_class_by_id(
    repo: &dyn ClassRepository,
    id: &str,
) -> Result<Option<Class>, DomainError> {
    repo.find_by_id(id).await
}

pub async fn find_all_classes(
    repo: &dyn ClassRepository,
    query: FindAllClassesQuery,
) -> Result<Vec<ClassWithClients>, DomainError> {
    let date = query.date.as_deref().map(normalize_date).transpose()?;

    let classes = repo
        .find_all(ClassFilter {
            company_id: Some(query.company_id),
            date,
            client_identification: query.client_identification,
        })
        .await?;

    if query.booked_classes {
        return Ok(only_booked(classes));
    }
    Ok(classes)
}

pub async fn find_all_classes_by_date(
    repo: &dyn ClassRepository,
    company_id: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<ClassWithClients>, DomainError> {
    let start_date = normalize_date(start_date)?;
    let end_date = normalize_date(end_date)?;
    if start_date > end_date {
        return Err(DomainError::Validation(format!(
            "startDate {} is after endDate {}",
            start_date, end_date
        )));
    }

    repo.find_by_date_range(company_id, &start_date, &end_date)
        .await
}

pub async fn book_class(
    repo: &dyn ClassRepository,
    class_id: &str,
    client_id: &str,
) -> Result<Class, DomainError> {
    match repo.book(class_id, client_id).await {
        Ok(class) => {
            tracing::info!(
                "Client {} booked class {} ({} lots left)",
                client_id,
                class_id,
                class.lots
            );
            Ok(class)
        }
        Err(e) => {
            tracing::warn!("Booking of class {} by {} rejected: {}", class_id, client_id, e);
            Err(e)
        }
    }
}

/// The client's class with the earliest timestamp, if any
pub async fn find_next_client_class(
    repo: &dyn ClassRepository,
    client_id: &str,
) -> Result<Option<Class>, DomainError> {
    match repo.find_by_client(client_id, None).await {
        Ok(classes) => Ok(earliest_class(classes.into_iter().map(|c| c.class))),
        // Unknown client simply has no classes
        Err(DomainError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn cancel_class(
    repo: &dyn ClassRepository,
    class_id: &str,
    client_id: &str,
) -> Result<Class, DomainError> {
    let class = repo.cancel(class_id, client_id).await?;
    tracing::info!(
        "Client {} cancelled class {} ({} lots left)",
        client_id,
        class_id,
        class.lots
    );
    Ok(class)
}

pub async fn find_clients_on_class(
    repo: &dyn ClassRepository,
    class_id: &str,
) -> Result<Vec<Client>, DomainError> {
    repo.find_clients(class_id).await
}

pub async fn find_scheduled_classes(
    repo: &dyn ClassRepository,
    client_id: &str,
    date: Option<&str>,
) -> Result<Vec<ClassWithCompany>, DomainError> {
    let date = date.map(normalize_date).transpose()?;
    repo.find_by_client(client_id, date.as_deref()).await
}

/// The client's booked services followed by their booked classes
pub async fn find_scheduled_classes_and_consults(
    class_repo: &dyn ClassRepository,
    consult_repo: &dyn ConsultRepository,
    client_id: &str,
    date: Option<&str>,
) -> Result<Vec<ScheduledItem>, DomainError> {
    let date = date.map(normalize_date).transpose()?;
    let classes = class_repo.find_by_client(client_id, date.as_deref()).await?;
    let services = consult_repo
        .find_services_by_client(client_id, date.as_deref())
        .await?;

    Ok(merge_schedule(services, classes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: &str, ts: &str) -> Class {
        Class {
            id: id.to_string(),
            company_id: "company".to_string(),
            name: format!("Class {}", id),
            date: "2024-03-01".to_string(),
            date_timestamp: ts.to_string(),
            lots: 10,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn client(id: &str) -> Client {
        Client {
            id: id.to_string(),
            identification: format!("ID-{}", id),
            name: id.to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn service(id: &str) -> Service {
        Service {
            id: id.to_string(),
            partner_id: "partner".to_string(),
            name: "Massage".to_string(),
            description: None,
            price: Some(50.0),
            duration_minutes: Some(60),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn earliest_class_of_nothing_is_none() {
        assert!(earliest_class(Vec::new()).is_none());
    }

    #[test]
    fn earliest_class_compares_numerically() {
        // "900" sorts after "1000" as text
        let next = earliest_class(vec![
            class("a", "1000"),
            class("b", "900"),
            class("c", "5000"),
        ])
        .unwrap();
        assert_eq!(next.id, "b");
    }

    #[test]
    fn earliest_class_keeps_first_on_tie() {
        let next = earliest_class(vec![class("a", "100"), class("b", "100")]).unwrap();
        assert_eq!(next.id, "a");
    }

    #[test]
    fn unparseable_timestamps_lose() {
        let next = earliest_class(vec![class("bad", "soon"), class("ok", "99999")]).unwrap();
        assert_eq!(next.id, "ok");

        let only_bad = earliest_class(vec![class("x", ""), class("y", "n/a")]).unwrap();
        assert_eq!(only_bad.id, "x");
    }

    #[test]
    fn only_booked_drops_empty_classes() {
        let classes = vec![
            ClassWithClients {
                class: class("empty", "1"),
                clients: vec![],
            },
            ClassWithClients {
                class: class("full", "2"),
                clients: vec![client("c1")],
            },
        ];

        let booked = only_booked(classes);
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].class.id, "full");
    }

    #[test]
    fn schedule_lists_services_before_classes() {
        let merged = merge_schedule(
            vec![service("s1"), service("s2")],
            vec![ClassWithCompany {
                class: class("k1", "1"),
                company: None,
            }],
        );

        assert_eq!(merged.len(), 3);
        assert!(matches!(&merged[0], ScheduledItem::Service(s) if s.id == "s1"));
        assert!(matches!(&merged[1], ScheduledItem::Service(s) if s.id == "s2"));
        assert!(matches!(&merged[2], ScheduledItem::Class(c) if c.class.id == "k1"));
    }

    #[test]
    fn scheduled_items_are_tagged() {
        let json = serde_json::to_value(merge_schedule(
            vec![service("s1")],
            vec![ClassWithCompany {
                class: class("k1", "1"),
                company: None,
            }],
        ))
        .unwrap();

        assert_eq!(json[0]["type"], "service");
        assert_eq!(json[1]["type"], "class");
        assert_eq!(json[1]["dateTimestamp"], "1");
    }

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(normalize_date("2024-02-29").unwrap(), "2024-02-29");
        assert!(matches!(
            normalize_date("29/02/2024"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            normalize_date("2023-02-29"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn unpadded_dates_are_padded() {
        assert_eq!(normalize_date("2024-3-5").unwrap(), "2024-03-05");
        assert_eq!(normalize_date(" 2024-12-1 ").unwrap(), "2024-12-01");
    }
}
