use serde_json::Value;

use super::dto::{field_text, MealSwapRequest, PlanRequest, RecipeRequest};

const ANY_LIKES: &str = "будь-які";
const NO_DISLIKES: &str = "немає";

const BATCH_INSTRUCTION: &str =
    "СТРАТЕГІЯ: Batch Cooking (готуємо раз на 3 дні). Обід Пн=Вт=Ср.";

const PLAN_FORMAT: &str = r#"ФОРМАТ JSON:
{
    "weekly_plan": {
        "monday": { "breakfast": {"name":"", "cal":0, "rec":""}, "lunch": {"name":"", "cal":0, "rec":""}, "dinner": {"name":"", "cal":0, "rec":""}, "snack": {"name":"", "cal":0} },
        "tuesday": { ... },
        "wednesday": { ... },
        "thursday": { ... },
        "friday": { ... },
        "saturday": { ... },
        "sunday": { ... }
    },
    "shopping_list": {
        "Овочі 🥬": ["..."],
        "М'ясо/Риба 🥩": ["..."],
        "Бакалія 🍚": ["..."],
        "Молочка 🧀": ["..."]
    },
    "notes": "Порада нутриціолога"
}
"rec" - це дуже короткий опис (1 речення)."#;

fn text_or<'a>(v: &'a Option<String>, fallback: &'a str) -> &'a str {
    v.as_deref().filter(|s| !s.is_empty()).unwrap_or(fallback)
}

fn value_or(v: &Option<Value>, fallback: &str) -> String {
    field_text(v)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn profile_line(req: &PlanRequest) -> Option<String> {
    let parts: Vec<String> = [
        ("вік", &req.age, ""),
        ("вага", &req.weight, " кг"),
        ("зріст", &req.height, " см"),
        ("стать", &req.gender, ""),
        ("активність", &req.activity, ""),
        ("ціль", &req.goal, ""),
    ]
    .into_iter()
    .filter_map(|(label, value, unit)| {
        field_text(value)
            .filter(|s| !s.is_empty())
            .map(|v| format!("{label} {v}{unit}"))
    })
    .collect();
    (!parts.is_empty()).then(|| format!("- Профіль: {}", parts.join(", ")))
}

/// Caller must have validated the request.
pub fn plan_prompt(req: &PlanRequest) -> String {
    let macros = req.macros.clone().unwrap_or_default();
    let mut lines = vec![
        "Ти професійний нутриціолог. Склади меню (JSON).".to_string(),
        "ОБМЕЖЕННЯ:".to_string(),
        format!("- Калорії: {} ккал/день", value_or(&req.target_calories, "")),
        format!(
            "- Б/Ж/В: {}/{}/{}г",
            value_or(&macros.protein, "?"),
            value_or(&macros.fats, "?"),
            value_or(&macros.carbs, "?")
        ),
    ];
    if let Some(budget) = field_text(&req.budget).filter(|s| !s.is_empty()) {
        lines.push(format!("- Бюджет: {budget}"));
    }
    lines.push(format!("- Виключення: {}", value_or(&req.dislikes, NO_DISLIKES)));
    lines.push(format!("- Любить: {}", value_or(&req.likes, ANY_LIKES)));
    if let Some(profile) = profile_line(req) {
        lines.push(profile);
    }
    if req.is_batch_cooking() {
        lines.push(BATCH_INSTRUCTION.to_string());
    }
    lines.push(PLAN_FORMAT.to_string());
    lines.join("\n")
}

pub fn meal_swap_prompt(req: &MealSwapRequest) -> String {
    format!(
        r#"Ти нутриціолог. Користувач не хоче їсти "{current}" на {slot} у {day}.
Запропонуй альтернативу.
Вподобання: {likes}.
Виключення: {dislikes}.
Поверни ТІЛЬКИ JSON для цієї однієї страви:
{{"name": "Нова назва", "cal": 500, "rec": "Короткий опис"}}"#,
        current = text_or(&req.current_name, ""),
        slot = text_or(&req.meal_type, ""),
        day = text_or(&req.day, ""),
        likes = text_or(&req.likes, ANY_LIKES),
        dislikes = text_or(&req.dislikes, NO_DISLIKES),
    )
}

pub fn recipe_prompt(req: &RecipeRequest) -> String {
    format!(
        r#"Ти шеф-кухар. Напиши ДЕТАЛЬНИЙ рецепт для страви: "{dish}".
Контекст: {summary}.
Поверни ТІЛЬКИ JSON:
{{
  "time": "20 хв",
  "ingredients": ["інгредієнт 1", "інгредієнт 2"],
  "steps": ["крок 1", "крок 2"]
}}"#,
        dish = text_or(&req.dish_name, ""),
        summary = text_or(&req.summary, ""),
    )
}

#[cfg(test)]
mod prompt_tests {
    use super::*;
    use crate::planner::dto::Macros;
    use serde_json::json;

    fn plan() -> PlanRequest {
        PlanRequest {
            target_calories: Some(json!(2000)),
            macros: Some(Macros {
                protein: Some(json!(150)),
                fats: Some(json!(70)),
                carbs: Some(json!(200)),
            }),
            budget: Some("medium".into()),
            likes: Some("Курка, авокадо".into()),
            dislikes: Some("Риба, горіхи".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_prompt_embeds_targets() {
        let p = plan_prompt(&plan());
        assert!(p.contains("- Калорії: 2000 ккал/день"));
        assert!(p.contains("- Б/Ж/В: 150/70/200г"));
        assert!(p.contains("- Бюджет: medium"));
        assert!(p.contains("- Виключення: Риба, горіхи"));
        assert!(p.contains("- Любить: Курка, авокадо"));
        assert!(p.contains("\"weekly_plan\""));
        assert!(!p.contains("Batch Cooking"));
        assert!(!p.contains("Профіль"));
    }

    #[test]
    fn test_plan_prompt_batch_and_profile() {
        let req = PlanRequest {
            cooking_time: Some("batch".into()),
            age: Some(json!(30)),
            goal: Some("weight_loss".into()),
            ..plan()
        };
        let p = plan_prompt(&req);
        assert!(p.contains(BATCH_INSTRUCTION));
        assert!(p.contains("- Профіль: вік 30, ціль weight_loss"));
    }

    #[test]
    fn test_plan_prompt_renders_values_as_sent() {
        let req = PlanRequest {
            target_calories: Some(json!("2000")),
            macros: Some(Macros {
                protein: Some(json!("150")),
                fats: Some(json!(70.5)),
                carbs: None,
            }),
            age: Some(json!("30")),
            ..Default::default()
        };
        let p = plan_prompt(&req);
        assert!(p.contains("- Калорії: 2000 ккал/день"));
        assert!(p.contains("- Б/Ж/В: 150/70.5/?г"));
        assert!(p.contains("- Профіль: вік 30"));
    }

    #[test]
    fn test_plan_prompt_omits_absent_budget() {
        let req = PlanRequest {
            budget: None,
            ..plan()
        };
        assert!(!plan_prompt(&req).contains("Бюджет"));
    }

    #[test]
    fn test_meal_swap_prompt_defaults() {
        let req = MealSwapRequest {
            day: Some("monday".into()),
            meal_type: Some("breakfast".into()),
            current_name: Some("Омлет".into()),
            ..Default::default()
        };
        let p = meal_swap_prompt(&req);
        assert!(p.contains(r#"не хоче їсти "Омлет" на breakfast у monday"#));
        assert!(p.contains("Вподобання: будь-які."));
        assert!(p.contains("Виключення: немає."));
        assert!(p.contains(r#"{"name": "Нова назва", "cal": 500, "rec": "Короткий опис"}"#));
    }

    #[test]
    fn test_recipe_prompt() {
        let req = RecipeRequest {
            dish_name: Some("Omelet".into()),
            summary: Some("simple egg dish".into()),
        };
        let p = recipe_prompt(&req);
        assert!(p.contains(r#"страви: "Omelet""#));
        assert!(p.contains("Контекст: simple egg dish."));
        assert!(p.contains(r#""steps": ["крок 1", "крок 2"]"#));
    }
}
