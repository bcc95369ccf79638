//! Cross-module validation against published market conventions.

use tempus_core::calendars::default_registry;
use tempus_core::types::{Date, Frequency};

use crate::schedule::{Schedule, ScheduleConfig};

fn ymd(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

mod schedule_validation {
    use super::*;
    use rust_decimal_macros::dec;
    use tempus_core::daycounts::DayCount;

    #[test]
    fn test_four_year_semi_annual_bond() {
        let schedule = Schedule::generate(&ScheduleConfig::new(
            ymd(2000, 1, 5),
            ymd(2004, 1, 5),
            Frequency::SemiAnnual,
            default_registry().get("None").unwrap(),
        ))
        .unwrap();

        let expected: Vec<(i32, i32)> = vec![
            (20000705, 20000705),
            (20010105, 20010105),
            (20010705, 20010705),
            (20020105, 20020107),
            (20020705, 20020705),
            (20030105, 20030106),
            (20030705, 20030707),
            (20040105, 20040105),
        ];
        let actual: Vec<(i32, i32)> = schedule
            .periods()
            .iter()
            .map(|p| (p.accrual_end.to_yyyymmdd(), p.payment.to_yyyymmdd()))
            .collect();
        assert_eq!(actual, expected);

        // Every regular period is exactly half a year on a bond basis.
        for i in 0..schedule.len() {
            let yf = schedule
                .fraction(i, DayCount::ActualActualBond, true)
                .unwrap();
            assert_eq!(yf, dec!(0.5), "period {i}");
        }
    }

    #[test]
    fn test_schedule_on_market_calendar() {
        // A live calendar only changes payment dates, never the cycle.
        let on_none = Schedule::generate(&ScheduleConfig::new(
            ymd(2014, 6, 20),
            ymd(2019, 6, 20),
            Frequency::Quarterly,
            default_registry().get("None").unwrap(),
        ))
        .unwrap();
        let on_nyb = Schedule::generate(&ScheduleConfig::new(
            ymd(2014, 6, 20),
            ymd(2019, 6, 20),
            Frequency::Quarterly,
            default_registry().get("NYB").unwrap(),
        ))
        .unwrap();
        assert_eq!(on_none.len(), on_nyb.len());
        for (a, b) in on_none.periods().iter().zip(on_nyb.periods()) {
            assert_eq!(a.cycle_start, b.cycle_start);
            assert_eq!(a.cycle_end, b.cycle_end);
            assert!(b.payment >= a.cycle_end);
        }
    }
}

mod futures_validation {
    use super::*;
    use crate::imm::next_imm_date;

    #[test]
    fn test_eurodollar_decade_resolution() {
        let cases = [
            (ymd(2007, 12, 12), "EDZ7", ymd(2007, 12, 19)),
            (ymd(2007, 12, 17), "EDZ7", ymd(2007, 12, 19)),
            (ymd(2007, 12, 18), "EDZ7", ymd(2017, 12, 20)),
            (ymd(2007, 12, 12), "EDZ17", ymd(2017, 12, 20)),
            (ymd(2010, 1, 4), "DEC14", ymd(2014, 12, 17)),
        ];
        for (as_of, code, expected) in cases {
            assert_eq!(next_imm_date(as_of, code).unwrap(), expected, "{code} at {as_of}");
        }
    }
}

mod cds_validation {
    use super::*;
    use crate::cds;
    use tempus_core::types::Tenor;

    #[test]
    fn test_maturity_roll_reference_cases() {
        let as_of = ymd(2015, 9, 22);
        let zero = Tenor::default();
        assert_eq!(cds::maturity_3m(as_of, zero).unwrap(), ymd(2015, 12, 20));
        assert_eq!(cds::maturity_6m(as_of, zero).unwrap(), ymd(2015, 12, 20));
    }

    #[test]
    fn test_snac_window_table() {
        // One full year of quarterly windows on the US calendar. The
        // window start is the 20th adjusted Following.
        let cal = default_registry().get("NYB").unwrap();
        let cases = [
            (ymd(2014, 1, 10), ymd(2013, 12, 20)),
            (ymd(2014, 3, 19), ymd(2013, 12, 20)),
            (ymd(2014, 3, 20), ymd(2014, 3, 20)),
            (ymd(2014, 6, 19), ymd(2014, 3, 20)),
            (ymd(2014, 6, 20), ymd(2014, 6, 20)),
            // 2014-09-20 is a Saturday: the window opens on Monday the
            // 22nd, and the 21st still belongs to the June window.
            (ymd(2014, 9, 21), ymd(2014, 6, 20)),
            (ymd(2014, 9, 22), ymd(2014, 9, 22)),
            (ymd(2014, 12, 22), ymd(2014, 12, 22)),
        ];
        for (as_of, expected) in cases {
            assert_eq!(cds::snac_accrual_start(as_of, &cal).unwrap(), expected, "{as_of}");
        }
    }
}

mod property_tests {
    use super::*;
    use crate::fx::spot_date;
    use proptest::prelude::*;

    fn arb_date() -> impl Strategy<Value = Date> {
        (1990i32..2050, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
    }

    proptest! {
        #[test]
        fn prop_periods_contiguous_on_cycle(
            start in arb_date(),
            years in 1i32..10,
        ) {
            let maturity = start.add_years(years).unwrap();
            let schedule = Schedule::generate(&ScheduleConfig::new(
                start,
                maturity,
                Frequency::Quarterly,
                default_registry().get("NYB").unwrap(),
            )).unwrap();
            prop_assert_eq!(schedule.periods()[0].cycle_start, start);
            prop_assert_eq!(
                schedule.periods().last().unwrap().cycle_end,
                maturity
            );
            for pair in schedule.periods().windows(2) {
                prop_assert_eq!(pair[0].cycle_end, pair[1].cycle_start);
                prop_assert!(pair[0].cycle_start < pair[0].cycle_end);
            }
        }

        #[test]
        fn prop_spot_date_additive(start in arb_date(), n in 0u32..10) {
            let nyb = default_registry().get("NYB").unwrap();
            let lnb = default_registry().get("LNB").unwrap();
            let direct = spot_date(start, n + 1, &nyb, &lnb).unwrap();
            let stepped = spot_date(
                spot_date(start, n, &nyb, &lnb).unwrap(),
                1,
                &nyb,
                &lnb,
            ).unwrap();
            prop_assert_eq!(direct, stepped);
        }

        #[test]
        fn prop_spot_date_is_good_in_both(start in arb_date(), n in 1u32..10) {
            let nyb = default_registry().get("NYB").unwrap();
            let tgt = default_registry().get("TGT").unwrap();
            let spot = spot_date(start, n, &nyb, &tgt).unwrap();
            prop_assert!(nyb.is_business_day(spot));
            prop_assert!(tgt.is_business_day(spot));
        }
    }
}
