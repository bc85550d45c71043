//! Static recommendation content and its personalisation
//!
//! Weekly meal plans are authored at two calorie bases (1200 and 1600 kcal)
//! and scaled linearly to the user's energy target. Exercise plans and tips
//! are selected by activity level and diabetic status.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::health_metrics::ActivityLevel;
use crate::types::NutritionTargets;

/// Energy target assumed when the recommendation payload has none
pub const DEFAULT_ENERGY_KCAL: f64 = 1600.0;

/// Targets at or below this use the 1200 kcal plan
const LOW_CALORIE_PLAN_THRESHOLD: f64 = 1400.0;

// ============================================================================
// Meals
// ============================================================================

/// A single meal with its macronutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Meal {
    pub name: &'static str,
    pub portion: &'static str,
    pub calories: u32,
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
}

const fn meal(
    name: &'static str,
    portion: &'static str,
    calories: u32,
    carbs: u32,
    protein: u32,
    fat: u32,
) -> Meal {
    Meal {
        name,
        portion,
        calories,
        carbs,
        protein,
        fat,
    }
}

// Float-to-int casts saturate, so huge factors pin at u32::MAX
fn scale_value(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).round() as u32
}

/// Scale a meal's calories and macros by `factor`, rounding to the nearest
/// integer. Non-finite or non-positive factors leave the meal unchanged.
pub fn scale_meal(meal: &Meal, factor: f64) -> Meal {
    if !factor.is_finite() || factor <= 0.0 {
        return *meal;
    }
    Meal {
        calories: scale_value(meal.calories, factor),
        carbs: scale_value(meal.carbs, factor),
        protein: scale_value(meal.protein, factor),
        fat: scale_value(meal.fat, factor),
        ..*meal
    }
}

/// A meal slot holds either one meal or several (e.g. two snacks)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "meals", rename_all = "snake_case")]
pub enum MealSlot {
    Single(Meal),
    List(Vec<Meal>),
}

impl MealSlot {
    pub fn meals(&self) -> &[Meal] {
        match self {
            MealSlot::Single(meal) => std::slice::from_ref(meal),
            MealSlot::List(meals) => meals,
        }
    }

    pub fn scaled(&self, factor: f64) -> MealSlot {
        match self {
            MealSlot::Single(meal) => MealSlot::Single(scale_meal(meal, factor)),
            MealSlot::List(meals) => {
                MealSlot::List(meals.iter().map(|m| scale_meal(m, factor)).collect())
            }
        }
    }

    pub fn calories(&self) -> u32 {
        self.meals()
            .iter()
            .fold(0, |total: u32, m| total.saturating_add(m.calories))
    }
}

/// One day of a meal plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub day: &'static str,
    pub breakfast: MealSlot,
    pub lunch: MealSlot,
    pub snack: MealSlot,
    pub dinner: MealSlot,
}

impl DayPlan {
    /// Slots in serving order, labelled
    pub fn slots(&self) -> [(&'static str, &MealSlot); 4] {
        [
            ("Breakfast", &self.breakfast),
            ("Lunch", &self.lunch),
            ("Snacks", &self.snack),
            ("Dinner", &self.dinner),
        ]
    }

    pub fn scaled(&self, factor: f64) -> DayPlan {
        DayPlan {
            day: self.day,
            breakfast: self.breakfast.scaled(factor),
            lunch: self.lunch.scaled(factor),
            snack: self.snack.scaled(factor),
            dinner: self.dinner.scaled(factor),
        }
    }

    pub fn total_calories(&self) -> u32 {
        self.slots()
            .iter()
            .fold(0, |total: u32, (_, slot)| total.saturating_add(slot.calories()))
    }
}

/// A weekly plan authored at a fixed calorie base
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealPlan {
    pub base_calories: u32,
    pub days: Vec<DayPlan>,
}

/// A weekly plan scaled to the user's target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalizedMealPlan {
    pub base_calories: u32,
    pub target_calories: f64,
    pub scale_factor: f64,
    pub days: Vec<DayPlan>,
}

fn usable_energy(energy: Option<f64>) -> Option<f64> {
    energy.filter(|e| e.is_finite() && *e > 0.0)
}

/// Pick the authored plan closest to an energy target
pub fn select_meal_plan(energy: Option<f64>) -> &'static MealPlan {
    match usable_energy(energy) {
        Some(e) if e <= LOW_CALORIE_PLAN_THRESHOLD => &MEAL_PLAN_1200,
        _ => &MEAL_PLAN_1600,
    }
}

/// Scale the matching weekly plan to `energy` adjusted for activity level
pub fn personalized_meal_plan(
    energy: Option<f64>,
    activity_level: ActivityLevel,
) -> PersonalizedMealPlan {
    let base = select_meal_plan(energy);
    let target =
        usable_energy(energy).unwrap_or(DEFAULT_ENERGY_KCAL) * activity_level.meal_plan_factor();
    let factor = target / base.base_calories as f64;

    PersonalizedMealPlan {
        base_calories: base.base_calories,
        target_calories: target,
        scale_factor: factor,
        days: base.days.iter().map(|d| d.scaled(factor)).collect(),
    }
}

// ============================================================================
// Exercises
// ============================================================================

/// A suggested exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub name: &'static str,
    pub duration: &'static str,
    pub frequency: &'static str,
    pub description: &'static str,
}

const fn exercise(
    name: &'static str,
    duration: &'static str,
    frequency: &'static str,
    description: &'static str,
) -> Exercise {
    Exercise {
        name,
        duration,
        frequency,
        description,
    }
}

const LOW_DIABETIC: &[Exercise] = &[
    exercise("Walking", "20-30 minutes", "5 days/week", "A gentle walk to improve circulation."),
    exercise("Chair Yoga", "15 minutes", "3 days/week", "Low-impact stretching for flexibility."),
];

const LOW_NON_DIABETIC: &[Exercise] = &[
    exercise(
        "Brisk Walking",
        "30 minutes",
        "5 days/week",
        "Increase heart rate with a faster pace.",
    ),
    exercise(
        "Light Stretching",
        "10 minutes",
        "Daily",
        "Improve flexibility and reduce stiffness.",
    ),
];

const MODERATE_DIABETIC: &[Exercise] = &[
    exercise("Swimming", "30 minutes", "3 days/week", "Low-impact cardio to manage blood sugar."),
    exercise(
        "Strength Training",
        "20 minutes",
        "2 days/week",
        "Use light weights to build muscle.",
    ),
];

const MODERATE_NON_DIABETIC: &[Exercise] = &[
    exercise("Jogging", "30 minutes", "4 days/week", "Moderate cardio for overall fitness."),
    exercise("Bodyweight Exercises", "20 minutes", "3 days/week", "Squats, push-ups, and lunges."),
];

const HIGH_DIABETIC: &[Exercise] = &[
    exercise("Cycling", "45 minutes", "4 days/week", "Cardio to improve endurance."),
    exercise("Resistance Training", "30 minutes", "3 days/week", "Moderate weights for strength."),
];

const HIGH_NON_DIABETIC: &[Exercise] = &[
    exercise("Running", "45 minutes", "5 days/week", "High-intensity cardio for fitness."),
    exercise("HIIT", "20 minutes", "3 days/week", "High-intensity interval training."),
];

/// Exercise plan for an activity level and diabetic status
pub fn exercise_plan(activity_level: ActivityLevel, diabetic: bool) -> &'static [Exercise] {
    match (activity_level, diabetic) {
        (ActivityLevel::Low, true) => LOW_DIABETIC,
        (ActivityLevel::Low, false) => LOW_NON_DIABETIC,
        (ActivityLevel::Medium, true) => MODERATE_DIABETIC,
        (ActivityLevel::Medium, false) => MODERATE_NON_DIABETIC,
        (ActivityLevel::High, true) => HIGH_DIABETIC,
        (ActivityLevel::High, false) => HIGH_NON_DIABETIC,
    }
}

// ============================================================================
// Tips
// ============================================================================

const DIABETIC_TIPS: &[&str] = &[
    "Monitor your blood sugar levels regularly and consult your doctor for personalized advice.",
    "Choose low-glycemic index foods to manage blood sugar spikes.",
    "Stay hydrated and avoid sugary drinks.",
    "Incorporate fiber-rich foods like vegetables and legumes to improve digestion and satiety.",
    "Schedule regular check-ups to monitor your health and adjust your diet as needed.",
];

const PREVENTION_TIPS: &[&str] = &[
    "Maintain a balanced diet with a variety of whole foods to prevent diabetes risk.",
    "Engage in regular physical activity to keep your weight in a healthy range.",
    "Limit processed foods and added sugars to reduce the risk of developing diabetes.",
    "Get enough sleep to support overall metabolic health.",
    "Stay proactive with annual health screenings to catch any early signs of risk.",
];

pub fn tips(diabetic: bool) -> &'static [&'static str] {
    if diabetic {
        DIABETIC_TIPS
    } else {
        PREVENTION_TIPS
    }
}

/// Rotating view over a list of tips
#[derive(Debug, Clone)]
pub struct TipCarousel {
    tips: &'static [&'static str],
    index: usize,
}

impl TipCarousel {
    pub fn new(diabetic: bool) -> Self {
        Self {
            tips: tips(diabetic),
            index: 0,
        }
    }

    pub fn current(&self) -> Option<&'static str> {
        self.tips.get(self.index).copied()
    }

    pub fn next(&mut self) -> Option<&'static str> {
        if !self.tips.is_empty() {
            self.index = (self.index + 1) % self.tips.len();
        }
        self.current()
    }

    pub fn previous(&mut self) -> Option<&'static str> {
        if !self.tips.is_empty() {
            self.index = (self.index + self.tips.len() - 1) % self.tips.len();
        }
        self.current()
    }

    pub fn position(&self) -> usize {
        self.index
    }
}

// ============================================================================
// Daily Guidance
// ============================================================================

/// Secondary daily figures derived from the nutrition targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyGuidance {
    pub water_liters: u32,
    pub fiber_grams: u32,
    pub carbs_percent: u32,
    pub protein_percent: u32,
    pub fat_percent: u32,
}

impl DailyGuidance {
    pub fn new(weight_kg: f64, targets: &NutritionTargets) -> Self {
        let calories = targets.energy;
        let share = |grams: f64, kcal_per_gram: f64| -> u32 {
            if calories > 0.0 {
                (grams * kcal_per_gram / calories * 100.0).round().max(0.0) as u32
            } else {
                0
            }
        };

        Self {
            water_liters: (weight_kg * 0.033).round().max(0.0) as u32,
            fiber_grams: (calories / 1000.0 * 14.0).round().max(0.0) as u32,
            carbs_percent: share(targets.carbs, 4.0),
            protein_percent: share(targets.protein, 4.0),
            fat_percent: share(targets.fat, 9.0),
        }
    }
}

// ============================================================================
// Authored Meal Plans
// ============================================================================

static MEAL_PLAN_1200: Lazy<MealPlan> = Lazy::new(build_plan_1200);
static MEAL_PLAN_1600: Lazy<MealPlan> = Lazy::new(build_plan_1600);

fn build_plan_1200() -> MealPlan {
    MealPlan {
        base_calories: 1200,
        days: vec![
            DayPlan {
                day: "Monday",
                breakfast: MealSlot::Single(meal(
                    "Poached Egg & Avocado Toast",
                    "1 egg, 1/2 avocado, Ezekiel bread, 1 orange",
                    300,
                    39,
                    14,
                    12,
                )),
                lunch: MealSlot::Single(meal(
                    "Mexican Bowl",
                    "2/3 cup pinto beans, 1 cup spinach, 1/4 cup tomatoes, \
                    1/4 cup peppers, 1 oz cheese, 1 tbsp salsa",
                    350,
                    30,
                    18,
                    10,
                )),
                snack: MealSlot::Single(meal(
                    "Carrots & Hummus",
                    "20 baby carrots, 2 tbsp hummus",
                    150,
                    21,
                    5,
                    8,
                )),
                dinner: MealSlot::Single(meal(
                    "Lentil Pasta with Turkey",
                    "1 cup lentil penne, 2 oz turkey, 1.5 cups veggie tomato sauce",
                    400,
                    35,
                    22,
                    15,
                )),
            },
            DayPlan {
                day: "Tuesday",
                breakfast: MealSlot::Single(meal(
                    "Blueberry Oatmeal",
                    "3/4 cup blueberries, 1 cup oatmeal, 1 oz almonds, 1 tsp chia seeds",
                    320,
                    34,
                    12,
                    14,
                )),
                lunch: MealSlot::Single(meal(
                    "Chicken Avocado Salad",
                    "1/2 cup chickpeas, 2 cups spinach, 2 oz chicken, \
                    1/2 avocado, 1/2 cup strawberries",
                    380,
                    52,
                    24,
                    18,
                )),
                snack: MealSlot::Single(meal(
                    "Peach Cottage Cheese",
                    "1 small peach, 1/3 cup 2% cottage cheese",
                    120,
                    16,
                    8,
                    3,
                )),
                dinner: MealSlot::Single(meal(
                    "Mediterranean Couscous",
                    "2/3 cup couscous, 1/2 cup eggplant, sundried tomatoes, olives, cucumber",
                    380,
                    38,
                    15,
                    12,
                )),
            },
            DayPlan {
                day: "Wednesday",
                breakfast: MealSlot::Single(meal(
                    "Veggie Omelet with Black Beans",
                    "2 eggs, spinach, mushrooms, bell pepper, avocado, 1/2 cup black beans",
                    350,
                    34,
                    20,
                    16,
                )),
                lunch: MealSlot::Single(meal(
                    "Tuna Sandwich",
                    "2 slices whole wheat bread, 2 oz tuna, veggies, 1/2 apple",
                    400,
                    40,
                    25,
                    10,
                )),
                snack: MealSlot::Single(meal("Unsweetened Kefir", "1 cup kefir", 110, 12, 9, 2)),
                dinner: MealSlot::Single(meal(
                    "Pork with Asparagus",
                    "2 oz pork, 1/2 cup succotash, 1 cup asparagus, 1/2 cup pineapple",
                    380,
                    34,
                    22,
                    14,
                )),
            },
            DayPlan {
                day: "Thursday",
                breakfast: MealSlot::Single(meal(
                    "Sweet Potato Toast",
                    "2 slices sweet potato, 1 oz goat cheese, spinach, flaxseed",
                    300,
                    44,
                    12,
                    10,
                )),
                lunch: MealSlot::Single(meal(
                    "Chicken & Cauliflower",
                    "2 oz chicken, 1 cup cauliflower, 1 cup strawberries",
                    280,
                    23,
                    18,
                    8,
                )),
                snack: MealSlot::Single(meal(
                    "Yogurt with Banana",
                    "1 cup Greek yogurt, 1/2 banana",
                    150,
                    15,
                    12,
                    2,
                )),
                dinner: MealSlot::Single(meal(
                    "Quinoa with Tofu",
                    "2/3 cup quinoa, 8 oz tofu, bok choy, broccoli, kiwi",
                    420,
                    44,
                    24,
                    12,
                )),
            },
            DayPlan {
                day: "Friday",
                breakfast: MealSlot::Single(meal(
                    "High Fiber Cereal",
                    "1/3 cup Grape-Nuts, 1/2 cup blueberries, almond milk",
                    300,
                    41,
                    8,
                    6,
                )),
                lunch: MealSlot::Single(meal(
                    "Spinach Salad",
                    "2 cups spinach, 1 oz cheese, boiled egg, grapes, chickpeas",
                    380,
                    47,
                    20,
                    14,
                )),
                snack: MealSlot::Single(meal(
                    "Celery with Peanut Butter",
                    "1 cup celery, 1 tbsp peanut butter",
                    120,
                    6,
                    5,
                    8,
                )),
                dinner: MealSlot::Single(meal(
                    "Salmon with Baked Potato",
                    "2 oz salmon, 1 medium baked potato, 1.5 cups asparagus",
                    400,
                    39,
                    25,
                    12,
                )),
            },
            DayPlan {
                day: "Saturday",
                breakfast: MealSlot::Single(meal(
                    "Greek Yogurt with Fruit",
                    "1 cup yogurt, 1/2 banana, 1 cup strawberries, chia seeds",
                    280,
                    32,
                    18,
                    8,
                )),
                lunch: MealSlot::Single(meal(
                    "Black Bean Tacos",
                    "2 corn tortillas, 1/3 cup black beans, 1 oz cheese, avocado, coleslaw",
                    420,
                    70,
                    18,
                    16,
                )),
                snack: MealSlot::Single(meal(
                    "Veggies with Hummus",
                    "1 cherry tomato, 10 baby carrots, 2 tbsp hummus",
                    120,
                    14,
                    5,
                    6,
                )),
                dinner: MealSlot::Single(meal(
                    "Beef with Broccoli",
                    "2 oz beef, 1/2 baked potato, 1.5 cups broccoli, 3/4 cup strawberries",
                    380,
                    41,
                    22,
                    14,
                )),
            },
            DayPlan {
                day: "Sunday",
                breakfast: MealSlot::Single(meal(
                    "Chocolate Peanut Oatmeal",
                    "1/2 cup oatmeal, protein powder, 1 tbsp peanut butter, chia seeds",
                    320,
                    21,
                    20,
                    12,
                )),
                lunch: MealSlot::Single(meal(
                    "Lentil Pita Pocket",
                    "1 small pita, 1/2 cup lentils, veggies, 2 tbsp dressing",
                    350,
                    30,
                    18,
                    10,
                )),
                snack: MealSlot::Single(meal(
                    "Grapefruit with Almonds",
                    "1 small grapefruit, 1 oz almonds",
                    180,
                    26,
                    6,
                    12,
                )),
                dinner: MealSlot::Single(meal(
                    "Shrimp with Peas",
                    "2 oz shrimp, 1 cup peas, 1/2 cup beets, Swiss chard",
                    350,
                    39,
                    24,
                    10,
                )),
            },
        ],
    }
}

fn build_plan_1600() -> MealPlan {
    MealPlan {
        base_calories: 1600,
        days: vec![
            DayPlan {
                day: "Monday",
                breakfast: MealSlot::Single(meal(
                    "Poached Egg & Avocado Toast",
                    "1 egg, 1/2 avocado, Ezekiel bread, 1 orange",
                    300,
                    39,
                    14,
                    12,
                )),
                lunch: MealSlot::Single(meal(
                    "Mexican Bowl with Rice",
                    "1/3 cup brown rice, 2/3 cup baked beans, 1 cup spinach, veggies",
                    450,
                    43,
                    22,
                    14,
                )),
                snack: MealSlot::List(vec![
                    meal("Carrots & Hummus", "20 baby carrots, 2 tbsp hummus", 150, 21, 5, 8),
                    meal("Cucumber & Tahini", "1 cup cucumber, 2 tsp tahini", 100, 3, 2, 5),
                ]),
                dinner: MealSlot::Single(meal(
                    "Lentil Pasta with Turkey",
                    "1 cup lentil penne, 2 oz turkey, 1.5 cups veggie tomato sauce",
                    500,
                    35,
                    28,
                    18,
                )),
            },
            DayPlan {
                day: "Tuesday",
                breakfast: MealSlot::Single(meal(
                    "Blueberry Oatmeal Plus",
                    "3/4 cup blueberries, 1/2 cup oatmeal, 1 oz almonds, 2 tsp chia seeds",
                    350,
                    39,
                    14,
                    16,
                )),
                lunch: MealSlot::Single(meal(
                    "Chicken Avocado Salad",
                    "1/2 cup chickpeas, 2 cups spinach, 3 oz chicken, 1/2 avocado, strawberries",
                    450,
                    49,
                    28,
                    22,
                )),
                snack: MealSlot::List(vec![
                    meal(
                        "Peach Cottage Cheese",
                        "1 small peach, 1/3 cup cottage cheese",
                        140,
                        16,
                        10,
                        4,
                    ),
                    meal("Apple with Almond Butter", "1 apple, 2 tsp almond butter", 160, 16, 3, 7),
                ]),
                dinner: MealSlot::Single(meal(
                    "Mediterranean Couscous",
                    "2/3 cup couscous, eggplant, sundried tomatoes, olives, cucumber",
                    450,
                    38,
                    18,
                    16,
                )),
            },
            DayPlan {
                day: "Wednesday",
                breakfast: MealSlot::Single(meal(
                    "Veggie Omelet with Black Beans",
                    "2 eggs, spinach, mushrooms, bell pepper, avocado, 1/2 cup black beans",
                    400,
                    43,
                    22,
                    18,
                )),
                lunch: MealSlot::Single(meal(
                    "Tuna Sandwich Plus",
                    "2 slices whole wheat bread, 3 oz tuna, veggies, 1/2 apple",
                    450,
                    43,
                    28,
                    12,
                )),
                snack: MealSlot::List(vec![
                    meal("Unsweetened Kefir", "1 cup kefir", 110, 12, 9, 2),
                    meal("Peanuts & Carrots", "20 peanuts, 1 cup carrots", 140, 15, 6, 8),
                ]),
                dinner: MealSlot::Single(meal(
                    "Pork with Asparagus Plus",
                    "3 oz pork, 1/2 cup succotash, cornbread, 1 cup asparagus, pineapple",
                    500,
                    47,
                    28,
                    18,
                )),
            },
            DayPlan {
                day: "Thursday",
                breakfast: MealSlot::Single(meal(
                    "Sweet Potato Toast Plus",
                    "2 slices sweet potato, 1 oz goat cheese, spinach, flaxseed",
                    350,
                    44,
                    14,
                    12,
                )),
                lunch: MealSlot::Single(meal(
                    "Chicken & Cauliflower Plus",
                    "3 oz chicken, 1.5 cups cauliflower, 1 cup strawberries",
                    320,
                    23,
                    22,
                    10,
                )),
                snack: MealSlot::List(vec![
                    meal("Yogurt with Banana", "1 cup Greek yogurt, 1/2 banana", 150, 15, 12, 2),
                    meal(
                        "Celery with Peanut Butter",
                        "1 cup celery, 1.5 tsp peanut butter",
                        100,
                        6,
                        4,
                        6,
                    ),
                ]),
                dinner: MealSlot::Single(meal(
                    "Quinoa with Tofu Plus",
                    "2/3 cup quinoa, 8 oz tofu, bok choy, broccoli, kiwi",
                    480,
                    44,
                    28,
                    16,
                )),
            },
            DayPlan {
                day: "Friday",
                breakfast: MealSlot::Single(meal(
                    "High Fiber Cereal Plus",
                    "1/3 cup Grape-Nuts, 1/2 cup blueberries, almond milk",
                    350,
                    41,
                    10,
                    8,
                )),
                lunch: MealSlot::Single(meal(
                    "Spinach Salad Plus",
                    "2 cups spinach, 1 oz cheese, boiled egg, grapes, chickpeas",
                    420,
                    47,
                    22,
                    16,
                )),
                snack: MealSlot::List(vec![
                    meal(
                        "Celery with Peanut Butter",
                        "1 cup celery, 1 tbsp peanut butter",
                        120,
                        6,
                        5,
                        8,
                    ),
                    meal(
                        "Vegetable Juice & Olives",
                        "1/2 cup vegetable juice, 10 olives",
                        140,
                        24,
                        2,
                        10,
                    ),
                ]),
                dinner: MealSlot::Single(meal(
                    "Salmon with Baked Potato Plus",
                    "3 oz salmon, 1 medium baked potato, 1.5 cups asparagus",
                    480,
                    39,
                    30,
                    16,
                )),
            },
            DayPlan {
                day: "Saturday",
                breakfast: MealSlot::Single(meal(
                    "Greek Yogurt with Fruit Plus",
                    "1 cup yogurt, 1/2 banana, 1 cup strawberries, chia seeds",
                    320,
                    32,
                    20,
                    10,
                )),
                lunch: MealSlot::Single(meal(
                    "Black Bean Tacos Plus",
                    "2 corn tortillas, 1/2 cup black beans, 1 oz cheese, avocado, coleslaw",
                    480,
                    55,
                    22,
                    20,
                )),
                snack: MealSlot::List(vec![
                    meal(
                        "Veggies with Hummus",
                        "1 cherry tomato, 10 baby carrots, 2 tbsp hummus",
                        120,
                        14,
                        5,
                        6,
                    ),
                    meal("Avocado with Hot Sauce", "1/2 small avocado, hot sauce", 120, 9, 2, 10),
                ]),
                dinner: MealSlot::Single(meal(
                    "Beef with Broccoli Plus",
                    "2 oz beef, 1/2 baked potato, 1.5 cups broccoli, 3/4 cup strawberries",
                    450,
                    48,
                    26,
                    18,
                )),
            },
            DayPlan {
                day: "Sunday",
                breakfast: MealSlot::Single(meal(
                    "Chocolate Peanut Oatmeal Plus",
                    "1/2 cup oatmeal, protein powder, 1.5 tbsp peanut butter, chia seeds",
                    380,
                    21,
                    24,
                    16,
                )),
                lunch: MealSlot::Single(meal(
                    "Lentil Pita Pocket Plus",
                    "1 small pita, 1/2 cup lentils, veggies, 3 tbsp dressing",
                    400,
                    30,
                    20,
                    12,
                )),
                snack: MealSlot::List(vec![
                    meal(
                        "Apple with Pumpkin Seeds",
                        "1 medium apple, 1 oz pumpkin seeds",
                        200,
                        26,
                        8,
                        10,
                    ),
                    meal("Pistachios & Jicama", "16 pistachios, 1 cup jicama", 140, 15, 5, 8),
                ]),
                dinner: MealSlot::Single(meal(
                    "Shrimp with Peas Plus",
                    "3 oz shrimp, 1 cup peas, 1/2 cup beets, Swiss chard",
                    420,
                    39,
                    28,
                    14,
                )),
            },
        ],
    }
}
