use crate::infra::{parse_score, rating_engine, InMemoryAssessmentRepository};
use clap::Args;
use hotel_rating::assessments::{AssessmentService, HotelDetails, HotelSummary, SurveySubmission};
use hotel_rating::config::AppConfig;
use hotel_rating::error::AppError;
use hotel_rating::rating::{Category, CategoryScores, CriteriaScores, RatingEngine, RatingResult};
use hotel_rating::survey::{parse_criteria_csv, AnswerScale, SurveyAnswer, SurveyCatalog};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RateArgs {
    /// Category score as CATEGORY=VALUE; repeat for each category, order is kept
    #[arg(long = "score", value_parser = parse_score)]
    pub(crate) scores: Vec<(Category, f64)>,
    /// CSV export with `category,criterion,score` rows on the configured answer scale
    #[arg(long, conflicts_with = "scores")]
    pub(crate) criteria_csv: Option<PathBuf>,
    /// Print only the star and composite without the explanation
    #[arg(long)]
    pub(crate) no_explain: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Hotel to show in detail (defaults to the first sample hotel)
    #[arg(long)]
    pub(crate) hotel: Option<String>,
}

pub(crate) fn run_rate(args: RateArgs) -> Result<(), AppError> {
    let RateArgs {
        scores,
        criteria_csv,
        no_explain,
    } = args;

    let config = AppConfig::load()?;
    let engine = rating_engine(&config.survey)?;

    let (category_scores, criteria_scores) = match criteria_csv {
        Some(path) => {
            let reader = BufReader::new(File::open(&path)?);
            let sheet = parse_criteria_csv(reader, &engine, config.survey.answer_scale)?;
            (sheet.category_scores, sheet.criteria_scores)
        }
        None if scores.is_empty() => {
            return Err(AppError::InvalidInput(
                "provide --score CATEGORY=VALUE at least once or --criteria-csv PATH".to_string(),
            ))
        }
        None => (scores.into_iter().collect(), CriteriaScores::new()),
    };

    let result = engine.rate(&category_scores);
    render_rating(&category_scores, &result);

    if !no_explain {
        println!(
            "\n{}",
            engine.explain(&category_scores, &criteria_scores, result.star)
        );
    }

    Ok(())
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = rating_engine(&config.survey)?;
    let catalog = SurveyCatalog::standard();

    println!("Hotel survey catalog");
    println!(
        "Answers are collected on a 0-{} scale and rated on 0-10",
        config.survey.answer_scale.max()
    );

    println!("\nCategory weights");
    for entry in engine.config().weights() {
        println!(
            "- {} ({}): {:.0}%",
            entry.category.label(),
            entry.category.key(),
            entry.weight * 100.0
        );
    }

    println!("\nStar boundaries");
    for boundary in engine.config().boundaries() {
        println!(
            "- {} star: [{}, {})",
            boundary.star, boundary.min, boundary.max
        );
    }

    for spec in catalog.categories() {
        println!("\n{} - {}", spec.name, spec.description);
        for criterion in &spec.criteria {
            println!(
                "  - {} | {} ({})",
                criterion.id, criterion.name, criterion.description
            );
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let service = AssessmentService::new(
        repository,
        RatingEngine::default(),
        AnswerScale::default(),
    );

    println!("Hotel rating demo");
    let mut first_hotel = None;
    for submission in demo_submissions(service.catalog()) {
        let hotel_name = submission.hotel_name.clone();
        let outcome = service.submit(submission)?;
        println!(
            "- {}: {} star(s), composite {:.2}{}",
            hotel_name,
            outcome.result.star,
            outcome.result.weighted_average,
            outcome
                .result
                .applied_rule
                .map(|rule| format!(" (override {}: {})", rule.code(), rule.description()))
                .unwrap_or_default()
        );
        first_hotel.get_or_insert(outcome.hotel_id);
    }

    let hotels = service.hotels()?;
    println!("\nRegistered hotels");
    for hotel in &hotels {
        render_hotel_summary(hotel);
    }

    let selected = match args.hotel {
        Some(name) => hotels
            .iter()
            .find(|hotel| hotel.name.eq_ignore_ascii_case(name.trim()))
            .map(|hotel| hotel.id)
            .ok_or_else(|| AppError::InvalidInput(format!("no demo hotel named '{name}'")))?,
        None => match first_hotel {
            Some(id) => id,
            None => return Ok(()),
        },
    };

    let details = service.hotel(selected)?;
    render_hotel_details(&details);

    if let Some(latest) = details.assessments.first() {
        let mut category_scores = CategoryScores::new();
        let mut criteria_scores = CriteriaScores::new();
        for line in &latest.criteria {
            criteria_scores.insert(line.category, line.criterion.clone(), line.value);
        }
        for (category, criteria) in criteria_scores.iter() {
            let values: Vec<f64> = criteria.iter().map(|(_, value)| *value).collect();
            category_scores.insert(category, service.engine().category_rating(&values));
        }
        println!(
            "\n{}",
            service
                .engine()
                .explain(&category_scores, &criteria_scores, latest.star)
        );
    }

    Ok(())
}

fn render_rating(category_scores: &CategoryScores, result: &RatingResult) {
    println!("Star rating: {}", result.star);
    println!("Weighted average: {:.2}", result.weighted_average);
    println!("Boundary classification: {} star(s)", result.base_star);
    match result.applied_rule {
        Some(rule) => println!("Override {}: {}", rule.code(), rule.description()),
        None => println!("Override: none"),
    }
    println!("Categories rated: {}", category_scores.len());
}

fn render_hotel_summary(hotel: &HotelSummary) {
    let average = hotel
        .average_star
        .map(|value| format!("{value:.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "- #{} {}{} | {} assessment(s) | average {}",
        hotel.id,
        hotel.name,
        hotel
            .address
            .as_deref()
            .map(|address| format!(" ({address})"))
            .unwrap_or_default(),
        hotel.assessment_count,
        average
    );
}

fn render_hotel_details(details: &HotelDetails) {
    println!("\nHotel detail: {}", details.hotel.name);
    for assessment in &details.assessments {
        println!(
            "- assessment #{} on {}: {} star(s), composite {:.2}",
            assessment.id,
            assessment.recorded_at.format("%Y-%m-%d %H:%M"),
            assessment.star,
            assessment.weighted_average
        );
        let mut current = None;
        for line in &assessment.criteria {
            if current != Some(line.category) {
                println!("  {}", line.category.label());
                current = Some(line.category);
            }
            println!("    - {}: {}", line.criterion, line.value);
        }
    }
}

fn demo_submissions(catalog: &SurveyCatalog) -> Vec<SurveySubmission> {
    vec![
        demo_submission(
            catalog,
            "Grand Palace",
            Some("12 Harbour Road"),
            &[
                (Category::ServiceQuality, 9.0),
                (Category::Infrastructure, 10.0),
                (Category::Location, 9.0),
                (Category::Dining, 9.0),
                (Category::RoomComfort, 10.0),
            ],
        ),
        demo_submission(
            catalog,
            "Riverside Inn",
            Some("3 Mill Lane"),
            &[
                (Category::ServiceQuality, 6.0),
                (Category::Infrastructure, 5.0),
                (Category::Location, 9.0),
                (Category::Dining, 7.0),
                (Category::RoomComfort, 8.0),
            ],
        ),
        demo_submission(
            catalog,
            "Budget Stay",
            None,
            &[
                (Category::ServiceQuality, 3.0),
                (Category::Infrastructure, 2.0),
                (Category::Location, 6.0),
                (Category::Dining, 3.0),
                (Category::RoomComfort, 4.0),
            ],
        ),
        demo_submission(
            catalog,
            "Grand Palace",
            None,
            &[
                (Category::ServiceQuality, 8.0),
                (Category::Infrastructure, 9.0),
                (Category::Location, 9.0),
                (Category::Dining, 6.0),
                (Category::RoomComfort, 9.0),
            ],
        ),
    ]
}

/// Answers every criterion of a category with the same score.
fn demo_submission(
    catalog: &SurveyCatalog,
    hotel_name: &str,
    address: Option<&str>,
    category_answers: &[(Category, f64)],
) -> SurveySubmission {
    let answers = category_answers
        .iter()
        .filter_map(|(category, score)| {
            catalog
                .category(*category)
                .map(|spec| (spec, *score))
        })
        .flat_map(|(spec, score)| {
            spec.criteria.iter().map(move |criterion| SurveyAnswer {
                criterion_id: criterion.id.clone(),
                score,
            })
        })
        .collect();

    SurveySubmission {
        hotel_name: hotel_name.to_string(),
        address: address.map(str::to_string),
        answers,
    }
}
