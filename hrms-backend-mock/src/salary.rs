//! Monthly salary computation
//!
//! Indian payroll conventions: HRA at the metro rate, statutory PF/ESI/PT
//! deductions and new-regime income tax. Every allowance is pro-rated by
//! attendance; all published figures are rounded to two decimal places.

use chrono::{Datelike, NaiveDate, Weekday};
use shared::models::{
    AttendanceDetails, Deductions, Earnings, EmployeeInfo, EmployeeRecord, EmployerContributions,
    SalaryCalculation,
};

const HRA_RATE: f64 = 0.50;
const DA_RATE: f64 = 0.10;
const MEDICAL_ALLOWANCE: f64 = 1250.0;
const TRANSPORT_ALLOWANCE: f64 = 1600.0;

const PF_RATE: f64 = 0.12;
/// Statutory wage ceiling for PF
const PF_WAGE_CAP: f64 = 15000.0;

const ESI_EMPLOYEE_RATE: f64 = 0.0175;
const ESI_EMPLOYER_RATE: f64 = 0.0475;
/// ESI applies only up to this gross monthly salary
const ESI_GROSS_CAP: f64 = 21000.0;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Days in the month excluding Sundays
pub fn working_days(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let mut day = first;
    let mut count = 0;
    while day.month() == month {
        if day.weekday() != Weekday::Sun {
            count += 1;
        }
        day = day.succ_opt()?;
    }
    Some(count)
}

/// Human-readable period label, e.g. "March 2025"
pub fn month_label(year: i32, month: u32) -> Option<String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(first.format("%B %Y").to_string())
}

/// Professional tax slab on gross monthly salary
fn professional_tax(gross: f64) -> f64 {
    if gross <= 10000.0 {
        0.0
    } else if gross <= 15000.0 {
        150.0
    } else {
        200.0
    }
}

/// Monthly income tax under the new-regime slabs, annualized from the
/// current month's gross
fn income_tax(gross_monthly: f64) -> f64 {
    let annual = gross_monthly * 12.0;
    let annual_tax = if annual <= 300_000.0 {
        0.0
    } else if annual <= 600_000.0 {
        (annual - 300_000.0) * 0.05
    } else if annual <= 900_000.0 {
        15_000.0 + (annual - 600_000.0) * 0.10
    } else if annual <= 1_200_000.0 {
        45_000.0 + (annual - 900_000.0) * 0.15
    } else {
        90_000.0 + (annual - 1_200_000.0) * 0.20
    };
    annual_tax / 12.0
}

/// Compute the full breakdown for one employee and period.
/// `present_days` is clamped to the month's working days.
pub fn calculate(
    employee: &EmployeeRecord,
    year: i32,
    month: u32,
    present_days: u32,
) -> Option<SalaryCalculation> {
    let total_working_days = working_days(year, month)?;
    let present_days = present_days.min(total_working_days);
    let ratio = if total_working_days == 0 {
        0.0
    } else {
        f64::from(present_days) / f64::from(total_working_days)
    };

    let basic = round2(employee.basic_salary * ratio);
    let hra = round2(basic * HRA_RATE);
    let da = round2(basic * DA_RATE);
    let medical = round2(MEDICAL_ALLOWANCE * ratio);
    let transport = round2(TRANSPORT_ALLOWANCE * ratio);
    let gross = round2(basic + hra + da + medical + transport);

    let pf_base = basic.min(PF_WAGE_CAP);
    let pf_employee = round2(pf_base * PF_RATE);
    let pf_employer = round2(pf_base * PF_RATE);

    let (esi_employee, esi_employer) = if gross <= ESI_GROSS_CAP {
        (
            round2(gross * ESI_EMPLOYEE_RATE),
            round2(gross * ESI_EMPLOYER_RATE),
        )
    } else {
        (0.0, 0.0)
    };

    let pt = professional_tax(gross);
    let tax = round2(income_tax(gross));
    let total_deductions = round2(pf_employee + esi_employee + pt + tax);
    let net = round2(gross - total_deductions);

    Some(SalaryCalculation {
        employee_info: EmployeeInfo {
            employee_id: employee.employee_id.clone(),
            employee_name: employee.full_name.clone(),
            department: employee.department.clone(),
            designation: employee.designation.clone(),
            calculation_month: month_label(year, month)?,
        },
        employee_details: AttendanceDetails {
            present_days,
            total_working_days,
            attendance_percentage: round2(ratio * 100.0),
        },
        earnings: Earnings {
            basic_salary: basic,
            hra,
            da,
            medical_allowance: medical,
            transport_allowance: transport,
            special_allowance: 0.0,
            gross_salary: gross,
        },
        deductions: Deductions {
            pf_employee,
            pf_employer,
            esi_employee,
            esi_employer,
            professional_tax: pt,
            income_tax: tax,
            total_deductions,
        },
        net_salary: net,
        employer_contributions: EmployerContributions {
            pf_employer,
            esi_employer,
            total_employer_contribution: round2(pf_employer + esi_employer),
        },
    })
}
