use serde::{Deserialize, Serialize};

/// Number of positional ingredient/measure slots in an API record.
pub const INGREDIENT_SLOTS: usize = 20;

/// One ingredient line: the ingredient name and its paired measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measure: measure.into(),
        }
    }
}

/// Envelope returned by every endpoint. `meals` is `null` when the API has
/// nothing to return.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeListResponse {
    #[serde(default)]
    pub meals: Option<Vec<Recipe>>,
}

/// A single dish record as returned by TheMealDB.
///
/// The twenty `strIngredientN` / `strMeasureN` columns are gathered into two
/// fixed arrays; slot `i` of `ingredients` pairs with slot `i` of `measures`.
/// Records from the category filter endpoint only carry id, name and
/// thumbnail, so everything else is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecipe", into = "RawRecipe")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    pub youtube: Option<String>,
    pub ingredient_slots: [Option<String>; INGREDIENT_SLOTS],
    pub measure_slots: [Option<String>; INGREDIENT_SLOTS],
}

impl Recipe {
    /// Non-blank ingredient slots in slot order, each paired with its measure
    /// (empty when the measure slot is null). Duplicates are kept.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.ingredient_slots
            .iter()
            .zip(self.measure_slots.iter())
            .filter_map(|(ingredient, measure)| match ingredient {
                Some(name) if !name.trim().is_empty() => Some(Ingredient::new(
                    name.clone(),
                    measure.clone().unwrap_or_default(),
                )),
                _ => None,
            })
            .collect()
    }

    /// Instruction text split on `\r\n` and `\n`, blank lines removed.
    /// Lines are returned untrimmed.
    pub fn instruction_steps(&self) -> Vec<String> {
        self.instructions
            .as_deref()
            .map(split_steps)
            .unwrap_or_default()
    }
}

/// Split free-form text into non-blank lines, honouring both `\r\n` and `\n`.
pub(crate) fn split_steps(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Wire shape of a recipe, one field per JSON column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipe {
    id_meal: String,
    str_meal: String,
    #[serde(default)]
    str_category: Option<String>,
    #[serde(default)]
    str_area: Option<String>,
    #[serde(default)]
    str_instructions: Option<String>,
    #[serde(default)]
    str_meal_thumb: Option<String>,
    #[serde(default)]
    str_youtube: Option<String>,
    #[serde(default)]
    str_ingredient1: Option<String>,
    #[serde(default)]
    str_ingredient2: Option<String>,
    #[serde(default)]
    str_ingredient3: Option<String>,
    #[serde(default)]
    str_ingredient4: Option<String>,
    #[serde(default)]
    str_ingredient5: Option<String>,
    #[serde(default)]
    str_ingredient6: Option<String>,
    #[serde(default)]
    str_ingredient7: Option<String>,
    #[serde(default)]
    str_ingredient8: Option<String>,
    #[serde(default)]
    str_ingredient9: Option<String>,
    #[serde(default)]
    str_ingredient10: Option<String>,
    #[serde(default)]
    str_ingredient11: Option<String>,
    #[serde(default)]
    str_ingredient12: Option<String>,
    #[serde(default)]
    str_ingredient13: Option<String>,
    #[serde(default)]
    str_ingredient14: Option<String>,
    #[serde(default)]
    str_ingredient15: Option<String>,
    #[serde(default)]
    str_ingredient16: Option<String>,
    #[serde(default)]
    str_ingredient17: Option<String>,
    #[serde(default)]
    str_ingredient18: Option<String>,
    #[serde(default)]
    str_ingredient19: Option<String>,
    #[serde(default)]
    str_ingredient20: Option<String>,
    #[serde(default)]
    str_measure1: Option<String>,
    #[serde(default)]
    str_measure2: Option<String>,
    #[serde(default)]
    str_measure3: Option<String>,
    #[serde(default)]
    str_measure4: Option<String>,
    #[serde(default)]
    str_measure5: Option<String>,
    #[serde(default)]
    str_measure6: Option<String>,
    #[serde(default)]
    str_measure7: Option<String>,
    #[serde(default)]
    str_measure8: Option<String>,
    #[serde(default)]
    str_measure9: Option<String>,
    #[serde(default)]
    str_measure10: Option<String>,
    #[serde(default)]
    str_measure11: Option<String>,
    #[serde(default)]
    str_measure12: Option<String>,
    #[serde(default)]
    str_measure13: Option<String>,
    #[serde(default)]
    str_measure14: Option<String>,
    #[serde(default)]
    str_measure15: Option<String>,
    #[serde(default)]
    str_measure16: Option<String>,
    #[serde(default)]
    str_measure17: Option<String>,
    #[serde(default)]
    str_measure18: Option<String>,
    #[serde(default)]
    str_measure19: Option<String>,
    #[serde(default)]
    str_measure20: Option<String>,
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        Recipe {
            id: raw.id_meal,
            name: raw.str_meal,
            category: raw.str_category,
            area: raw.str_area,
            instructions: raw.str_instructions,
            thumbnail: raw.str_meal_thumb,
            youtube: raw.str_youtube,
            ingredient_slots: [
                raw.str_ingredient1,
                raw.str_ingredient2,
                raw.str_ingredient3,
                raw.str_ingredient4,
                raw.str_ingredient5,
                raw.str_ingredient6,
                raw.str_ingredient7,
                raw.str_ingredient8,
                raw.str_ingredient9,
                raw.str_ingredient10,
                raw.str_ingredient11,
                raw.str_ingredient12,
                raw.str_ingredient13,
                raw.str_ingredient14,
                raw.str_ingredient15,
                raw.str_ingredient16,
                raw.str_ingredient17,
                raw.str_ingredient18,
                raw.str_ingredient19,
                raw.str_ingredient20,
            ],
            measure_slots: [
                raw.str_measure1,
                raw.str_measure2,
                raw.str_measure3,
                raw.str_measure4,
                raw.str_measure5,
                raw.str_measure6,
                raw.str_measure7,
                raw.str_measure8,
                raw.str_measure9,
                raw.str_measure10,
                raw.str_measure11,
                raw.str_measure12,
                raw.str_measure13,
                raw.str_measure14,
                raw.str_measure15,
                raw.str_measure16,
                raw.str_measure17,
                raw.str_measure18,
                raw.str_measure19,
                raw.str_measure20,
            ],
        }
    }
}

impl From<Recipe> for RawRecipe {
    fn from(recipe: Recipe) -> Self {
        let [
            i1,
            i2,
            i3,
            i4,
            i5,
            i6,
            i7,
            i8,
            i9,
            i10,
            i11,
            i12,
            i13,
            i14,
            i15,
            i16,
            i17,
            i18,
            i19,
            i20,
        ] = recipe.ingredient_slots;
        let [
            m1,
            m2,
            m3,
            m4,
            m5,
            m6,
            m7,
            m8,
            m9,
            m10,
            m11,
            m12,
            m13,
            m14,
            m15,
            m16,
            m17,
            m18,
            m19,
            m20,
        ] = recipe.measure_slots;

        RawRecipe {
            id_meal: recipe.id,
            str_meal: recipe.name,
            str_category: recipe.category,
            str_area: recipe.area,
            str_instructions: recipe.instructions,
            str_meal_thumb: recipe.thumbnail,
            str_youtube: recipe.youtube,
            str_ingredient1: i1,
            str_ingredient2: i2,
            str_ingredient3: i3,
            str_ingredient4: i4,
            str_ingredient5: i5,
            str_ingredient6: i6,
            str_ingredient7: i7,
            str_ingredient8: i8,
            str_ingredient9: i9,
            str_ingredient10: i10,
            str_ingredient11: i11,
            str_ingredient12: i12,
            str_ingredient13: i13,
            str_ingredient14: i14,
            str_ingredient15: i15,
            str_ingredient16: i16,
            str_ingredient17: i17,
            str_ingredient18: i18,
            str_ingredient19: i19,
            str_ingredient20: i20,
            str_measure1: m1,
            str_measure2: m2,
            str_measure3: m3,
            str_measure4: m4,
            str_measure5: m5,
            str_measure6: m6,
            str_measure7: m7,
            str_measure8: m8,
            str_measure9: m9,
            str_measure10: m10,
            str_measure11: m11,
            str_measure12: m12,
            str_measure13: m13,
            str_measure14: m14,
            str_measure15: m15,
            str_measure16: m16,
            str_measure17: m17,
            str_measure18: m18,
            str_measure19: m19,
            str_measure20: m20,
        }
    }
}
