//! Validation test suite.
//!
//! Exact numerical cases from published day count references (ISDA 2008
//! examples, Stigum's money market tables, ICMA rule 251 examples) plus
//! property tests over the conversion and roll machinery.

#[cfg(test)]
mod act_act_validation {
    use crate::daycounts::DayCount;
    use crate::types::{Date, Frequency};
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_isda_reference_values() {
        let cases = [
            (ymd(2003, 11, 1), ymd(2004, 5, 1), dec!(0.497724380567)),
            (ymd(1999, 2, 1), ymd(1999, 7, 1), dec!(0.410958904110)),
            // 184/365 + 182/366
            (ymd(1999, 7, 1), ymd(2000, 7, 1), dec!(1.001377348604)),
            (ymd(2002, 8, 15), ymd(2003, 7, 15), dec!(0.915068493151)),
            (ymd(2003, 7, 15), ymd(2004, 1, 15), dec!(0.504004790778)),
            (ymd(1999, 7, 30), ymd(2000, 1, 30), dec!(0.503892506924)),
            (ymd(2000, 1, 30), ymd(2000, 6, 30), dec!(0.415300546448)),
        ];
        for (start, end, expected) in cases {
            let yf = DayCount::ActualActual.year_fraction(start, end).unwrap();
            assert_eq!(yf.round_dp(12), expected, "{start} -> {end}");
        }
    }

    #[test]
    fn test_icma_reference_values() {
        // Short first coupon: annual bond, period 1998-07-01 .. 1999-07-01.
        let yf = DayCount::ActualActualBond
            .fraction(
                ymd(1999, 2, 1),
                ymd(1999, 7, 1),
                ymd(1998, 7, 1),
                ymd(1999, 7, 1),
                Frequency::Annual,
            )
            .unwrap();
        assert_eq!(yf.round_dp(12), dec!(0.410958904110));

        // A regular semi-annual period accrues exactly half a year.
        let yf = DayCount::ActualActualBond
            .fraction(
                ymd(2003, 11, 1),
                ymd(2004, 5, 1),
                ymd(2003, 11, 1),
                ymd(2004, 5, 1),
                Frequency::SemiAnnual,
            )
            .unwrap();
        assert_eq!(yf, dec!(0.5));

        // Long first coupon splits at the notional boundary.
        let yf = DayCount::ActualActualBond
            .fraction(
                ymd(2002, 8, 15),
                ymd(2003, 7, 15),
                ymd(2003, 1, 15),
                ymd(2003, 7, 15),
                Frequency::SemiAnnual,
            )
            .unwrap();
        assert_eq!(yf.round_dp(12), dec!(0.915760869565));
    }

    #[test]
    fn test_icma_frequency_inferred_from_period() {
        // With Frequency::None the semi-annual layout is recovered from
        // the reference period length.
        let yf = DayCount::ActualActualBond
            .fraction(
                ymd(2003, 11, 1),
                ymd(2004, 5, 1),
                ymd(2003, 11, 1),
                ymd(2004, 5, 1),
                Frequency::None,
            )
            .unwrap();
        assert_eq!(yf, dec!(0.5));
    }

    #[test]
    fn test_afb_reference_values() {
        let cases = [
            (ymd(2003, 11, 1), ymd(2004, 5, 1), dec!(0.497267759563)),
            (ymd(2003, 7, 15), ymd(2004, 1, 15), dec!(0.504109589041)),
            (ymd(1999, 2, 1), ymd(1999, 7, 1), dec!(0.410958904110)),
            (ymd(2000, 1, 30), ymd(2000, 6, 30), dec!(0.415300546448)),
        ];
        for (start, end, expected) in cases {
            let yf = DayCount::ActualActualEuro.year_fraction(start, end).unwrap();
            assert_eq!(yf.round_dp(12), expected, "{start} -> {end}");
        }
        assert_eq!(
            DayCount::ActualActualEuro
                .year_fraction(ymd(1999, 7, 1), ymd(2000, 7, 1))
                .unwrap(),
            dec!(1)
        );
    }
}

#[cfg(test)]
mod thirty360_validation {
    use crate::daycounts::DayCount;
    use crate::types::Date;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    // ISDA 2008 30/360 bond basis examples.
    #[test]
    fn test_isda_2008_bond_basis_table() {
        let cases = [
            (ymd(2007, 1, 15), ymd(2007, 1, 30), 15),
            (ymd(2007, 1, 15), ymd(2007, 2, 15), 30),
            (ymd(2007, 1, 15), ymd(2007, 7, 15), 180),
            (ymd(2007, 9, 30), ymd(2008, 3, 31), 180),
            (ymd(2007, 9, 30), ymd(2007, 10, 31), 30),
            (ymd(2007, 9, 30), ymd(2008, 9, 30), 360),
            (ymd(2007, 1, 15), ymd(2007, 1, 31), 16),
            (ymd(2007, 1, 31), ymd(2007, 2, 28), 28),
            (ymd(2007, 2, 28), ymd(2007, 3, 31), 33),
            (ymd(2006, 8, 31), ymd(2007, 2, 28), 178),
            (ymd(2007, 2, 28), ymd(2007, 8, 31), 183),
            (ymd(2007, 2, 14), ymd(2007, 2, 28), 14),
            (ymd(2007, 2, 26), ymd(2008, 2, 29), 363),
            (ymd(2008, 2, 29), ymd(2009, 2, 28), 359),
            (ymd(2008, 2, 29), ymd(2008, 3, 30), 31),
            (ymd(2008, 2, 29), ymd(2008, 3, 31), 32),
            (ymd(2007, 2, 28), ymd(2007, 3, 5), 7),
            (ymd(2007, 10, 31), ymd(2007, 11, 28), 28),
            (ymd(2007, 8, 31), ymd(2008, 2, 29), 179),
            (ymd(2008, 2, 29), ymd(2008, 8, 31), 182),
            (ymd(2008, 8, 31), ymd(2009, 2, 28), 178),
            (ymd(2009, 2, 28), ymd(2009, 8, 31), 183),
        ];
        for (start, end, expected) in cases {
            assert_eq!(
                DayCount::Thirty360.day_count(start, end).unwrap(),
                expected,
                "{start} -> {end}"
            );
        }
    }

    // ISDA 2008 30E/360 examples, where they diverge from bond basis.
    #[test]
    fn test_isda_2008_eurobond_table() {
        let cases = [
            (ymd(2007, 2, 28), ymd(2007, 3, 31), 32),
            (ymd(2007, 8, 31), ymd(2008, 2, 29), 179),
            (ymd(2008, 2, 29), ymd(2008, 8, 31), 181),
            (ymd(2007, 1, 15), ymd(2007, 1, 31), 15),
        ];
        for (start, end, expected) in cases {
            assert_eq!(
                DayCount::ThirtyE360.day_count(start, end).unwrap(),
                expected,
                "{start} -> {end}"
            );
        }
    }

    // Stigum's classic disagreement examples across conventions.
    #[test]
    fn test_stigum_money_market_table() {
        let jan = (ymd(1986, 1, 1), ymd(1986, 2, 1));
        assert_eq!(DayCount::Actual360.day_count(jan.0, jan.1).unwrap(), 31);
        assert_eq!(DayCount::Thirty360.day_count(jan.0, jan.1).unwrap(), 30);
        assert_eq!(DayCount::ThirtyE360.day_count(jan.0, jan.1).unwrap(), 30);
        assert_eq!(DayCount::Thirty360Isma.day_count(jan.0, jan.1).unwrap(), 30);

        let aug = (ymd(1991, 8, 30), ymd(1991, 8, 31));
        assert_eq!(DayCount::Actual360.day_count(aug.0, aug.1).unwrap(), 1);
        assert_eq!(DayCount::Thirty360.day_count(aug.0, aug.1).unwrap(), 0);
    }

    // The SIA February rules are the only place the two 30/360 variants
    // disagree.
    #[test]
    fn test_sia_vs_bond_basis_divergence() {
        let start = ymd(2007, 2, 28);
        let end = ymd(2007, 3, 31);
        assert_eq!(DayCount::Thirty360.day_count(start, end).unwrap(), 33);
        assert_eq!(DayCount::Thirty360Isma.day_count(start, end).unwrap(), 30);

        // Off month-end the variants agree.
        let mid_start = ymd(2007, 2, 14);
        let mid_end = ymd(2007, 6, 15);
        assert_eq!(
            DayCount::Thirty360.day_count(mid_start, mid_end).unwrap(),
            DayCount::Thirty360Isma.day_count(mid_start, mid_end).unwrap()
        );
    }
}

#[cfg(test)]
mod serial_validation {
    use crate::types::Date;

    #[test]
    fn test_julian_anchor() {
        assert_eq!(
            Date::from_ymd(2000, 1, 1).unwrap().to_julian().unwrap(),
            2_451_545
        );
        // JDN is contiguous across the Gregorian leap rule.
        assert_eq!(
            Date::from_ymd(1900, 3, 1).unwrap().to_julian().unwrap()
                - Date::from_ymd(1900, 2, 28).unwrap().to_julian().unwrap(),
            1
        );
    }

    #[test]
    fn test_excel_anchor_and_contiguity() {
        let jan1_1900 = Date::from_ymd(1900, 1, 1).unwrap();
        assert_eq!(jan1_1900.to_excel().unwrap(), 367);
        assert_eq!(Date::from_excel(367).unwrap(), jan1_1900);
        // No phantom leap day: serials step by one across 1900-02-28.
        let feb28 = Date::from_ymd(1900, 2, 28).unwrap();
        let mar1 = Date::from_ymd(1900, 3, 1).unwrap();
        assert_eq!(mar1.to_excel().unwrap() - feb28.to_excel().unwrap(), 1);
    }

    #[test]
    fn test_serial_f64_quantization() {
        // 07:34:42 lands back on the 07:30 tick with seconds dropped.
        let original = Date::from_ymd_hms(2008, 5, 1, 7, 34, 42).unwrap();
        let back = Date::from_serial_f64(original.to_serial_f64().unwrap()).unwrap();
        assert_eq!(back, Date::from_ymd_hms(2008, 5, 1, 7, 30, 0).unwrap());
        // Ticks already on the grid survive exactly.
        let aligned = Date::from_ymd_hms(2008, 5, 1, 23, 50, 0).unwrap();
        let back = Date::from_serial_f64(aligned.to_serial_f64().unwrap()).unwrap();
        assert_eq!(back, aligned);
    }
}

#[cfg(test)]
mod property_tests {
    use crate::calendars::{Calendar, RollConvention};
    use crate::types::{Date, Tenor};
    use proptest::prelude::*;

    fn arb_date() -> impl Strategy<Value = Date> {
        (1900i32..=2149, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
    }

    proptest! {
        #[test]
        fn prop_yyyymmdd_round_trip(date in arb_date()) {
            let back = Date::from_yyyymmdd(date.to_yyyymmdd()).unwrap();
            prop_assert_eq!(back, date);
        }

        #[test]
        fn prop_julian_round_trip(date in arb_date()) {
            let back = Date::from_julian(date.to_julian().unwrap()).unwrap();
            prop_assert_eq!(back, date);
        }

        #[test]
        fn prop_excel_round_trip(date in arb_date()) {
            let back = Date::from_excel(date.to_excel().unwrap()).unwrap();
            prop_assert_eq!(back, date);
        }

        #[test]
        fn prop_add_days_inverts(date in arb_date(), n in -10_000i64..10_000) {
            if let Ok(moved) = date.add_days(n) {
                prop_assert_eq!(moved.add_days(-n).unwrap(), date);
                prop_assert_eq!(date.days_between(&moved), n);
            }
        }

        #[test]
        fn prop_tenor_display_round_trip(count in 1u32..600, unit_idx in 0usize..4) {
            let unit = ["D", "W", "M", "Y"][unit_idx];
            let tenor = Tenor::parse(&format!("{count}{unit}")).unwrap();
            prop_assert_eq!(Tenor::parse(&tenor.to_string()).unwrap(), tenor);
        }

        #[test]
        fn prop_roll_idempotent(date in arb_date(), conv_idx in 0usize..4) {
            let convention = [
                RollConvention::Following,
                RollConvention::ModifiedFollowing,
                RollConvention::Preceding,
                RollConvention::ModifiedPreceding,
            ][conv_idx];
            let cal = Calendar::weekend_only("None");
            if let Ok(rolled) = cal.roll(date, convention) {
                prop_assert!(cal.is_business_day(rolled));
                prop_assert_eq!(cal.roll(rolled, convention).unwrap(), rolled);
            }
        }
    }
}
