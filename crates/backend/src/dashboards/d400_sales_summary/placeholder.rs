//! Demo records for members that have never saved anything, so charts and
//! the ranking are not blank on first use. Nothing here is persisted.

use chrono::NaiveDate;
use contracts::domain::a001_sale::{Periodicity, Plan, Sale, SalesStatus};
use contracts::system::users::TeamMember;
use rand::Rng;

/// Member whose placeholder is a fixed, hand-written pair of sales
const SHOWCASE_SELLER: &str = "BRUNA MONTEIRO";

fn showcase_sales(seller: &str) -> Vec<Sale> {
    let sale = |id: &str, day: u32, revenue: f64, plan: Plan, payment: &str, status: SalesStatus| {
        let date = NaiveDate::from_ymd_opt(2025, 11, day).unwrap_or_default();
        Sale {
            id: id.to_string(),
            customer_id: id.to_string(),
            customer_name: format!("Cliente Exemplo {}", &id[1..]),
            date,
            revenue,
            mrr: revenue,
            plan: plan.label().to_string(),
            periodicity: Periodicity::Monthly,
            payment_method: payment.to_string(),
            purchase_date: date,
            status,
            hub_link: String::new(),
            notes: String::new(),
            seller_name: Some(seller.to_string()),
        }
    };
    vec![
        sale("001", 28, 1500.0, Plan::Essential, "Cartão", SalesStatus::SoldPaid),
        sale("002", 29, 3000.0, Plan::Control, "Boleto", SalesStatus::Open),
    ]
}

/// Two to five monthly sales dated `today`, roughly 70% of them paid
pub fn placeholder_sales<R: Rng + ?Sized>(member: &TeamMember, today: NaiveDate, rng: &mut R) -> Vec<Sale> {
    if member.name == SHOWCASE_SELLER {
        return showcase_sales(&member.name);
    }

    let count = rng.gen_range(2..=5);
    (0..count)
        .map(|i| {
            let revenue = rng.gen_range(1200..5200) as f64;
            let plan = if rng.gen_bool(0.5) { Plan::Essential } else { Plan::Complete };
            let status = if rng.gen_bool(0.7) {
                SalesStatus::SoldPaid
            } else {
                SalesStatus::Open
            };
            Sale {
                id: format!("{}_init_{}", member.id, i),
                customer_id: format!("ID-{}", rng.gen_range(0..1000)),
                customer_name: format!("Cliente {} ({})", i + 1, member.name),
                date: today,
                revenue,
                mrr: revenue,
                plan: plan.label().to_string(),
                periodicity: Periodicity::Monthly,
                payment_method: "Cartão".to_string(),
                purchase_date: today,
                status,
                hub_link: String::new(),
                notes: "Carga Inicial".to_string(),
                seller_name: Some(member.name.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn member(id: &str, name: &str) -> TeamMember {
        TeamMember {
            id: id.into(),
            name: name.into(),
            email: format!("{}@sharks.com", id),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_showcase_member_gets_fixed_pair() {
        let mut rng = StdRng::seed_from_u64(1);
        let sales = placeholder_sales(&member("user_bruna", "BRUNA MONTEIRO"), today(), &mut rng);

        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].id, "001");
        assert_eq!(sales[0].customer_name, "Cliente Exemplo 01");
        assert_eq!(sales[0].status, SalesStatus::SoldPaid);
        assert_eq!(sales[0].revenue, 1500.0);
        assert_eq!(sales[1].plan, "Controle");
        assert_eq!(sales[1].status, SalesStatus::Open);
        assert_eq!(sales[1].payment_method, "Boleto");
        assert_eq!(sales[1].date, NaiveDate::from_ymd_opt(2025, 11, 29).unwrap());
    }

    #[test]
    fn test_generated_sales_stay_in_range() {
        let davi = member("user_davi", "DAVI");
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sales = placeholder_sales(&davi, today(), &mut rng);

            assert!((2..=5).contains(&sales.len()));
            for (i, s) in sales.iter().enumerate() {
                assert_eq!(s.id, format!("user_davi_init_{}", i));
                assert!((1200.0..5200.0).contains(&s.revenue));
                assert_eq!(s.mrr, s.revenue);
                assert!(s.plan == "Essencial" || s.plan == "Completo");
                assert!(matches!(s.status, SalesStatus::SoldPaid | SalesStatus::Open));
                assert_eq!(s.periodicity, Periodicity::Monthly);
                assert_eq!(s.notes, "Carga Inicial");
                assert_eq!(s.customer_name, format!("Cliente {} (DAVI)", i + 1));
                assert_eq!(s.seller_name.as_deref(), Some("DAVI"));
                assert_eq!(s.date, today());
            }
        }
    }
}
