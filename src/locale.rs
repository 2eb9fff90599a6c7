/// Presentation-only locale presets: English (LTR) and Arabic (RTL). Switching
/// flips document directionality and the fixed UI string table; it never
/// touches catalog or selection data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    Arabic,
}

pub struct UiStrings {
    pub app_title: &'static str,
    pub locale_toggle: &'static str,
    pub search_hint: &'static str,
    pub category_label: &'static str,
    pub all_categories: &'static str,
    pub clear_filters: &'static str,
    pub products_heading: &'static str,
    pub loading_catalog: &'static str,
    pub catalog_failed: &'static str,
    pub no_results: &'static str,
    pub show_description: &'static str,
    pub hide_description: &'static str,
    pub select_product: &'static str,
    pub deselect_product: &'static str,
    pub selected_heading: &'static str,
    pub none_selected: &'static str,
    pub remove_product: &'static str,
    pub clear_selection: &'static str,
    pub generate_routine: &'static str,
    pub select_first: &'static str,
    pub chat_heading: &'static str,
    pub ask_hint: &'static str,
    pub send: &'static str,
    pub thinking: &'static str,
    pub you_label: &'static str,
    pub advisor_label: &'static str,
}

const ENGLISH: UiStrings = UiStrings {
    app_title: "Glowdesk",
    locale_toggle: "العربية",
    search_hint: "Search products...",
    category_label: "Category",
    all_categories: "All categories",
    clear_filters: "Clear filters",
    products_heading: "Products",
    loading_catalog: "Loading products...",
    catalog_failed: "Could not load the product catalog",
    no_results: "No products match your filters",
    show_description: "Show description",
    hide_description: "Hide description",
    select_product: "Select",
    deselect_product: "Selected ✓",
    selected_heading: "Selected Products",
    none_selected: "No products selected yet. Pick some from the grid.",
    remove_product: "Remove",
    clear_selection: "Clear all",
    generate_routine: "Generate Routine",
    select_first: "Select at least one product to generate a routine.",
    chat_heading: "Routine Chat",
    ask_hint: "Ask about your routine...",
    send: "Send",
    thinking: "Thinking...",
    you_label: "You",
    advisor_label: "Advisor",
};

const ARABIC: UiStrings = UiStrings {
    app_title: "غلوديسك",
    locale_toggle: "English",
    search_hint: "...ابحث عن المنتجات",
    category_label: "الفئة",
    all_categories: "كل الفئات",
    clear_filters: "مسح الفلاتر",
    products_heading: "المنتجات",
    loading_catalog: "...جارٍ تحميل المنتجات",
    catalog_failed: "تعذر تحميل كتالوج المنتجات",
    no_results: "لا توجد منتجات مطابقة للفلاتر",
    show_description: "عرض الوصف",
    hide_description: "إخفاء الوصف",
    select_product: "اختيار",
    deselect_product: "✓ مختار",
    selected_heading: "المنتجات المختارة",
    none_selected: "لم يتم اختيار منتجات بعد. اختر من الشبكة.",
    remove_product: "إزالة",
    clear_selection: "مسح الكل",
    generate_routine: "إنشاء روتين",
    select_first: "اختر منتجًا واحدًا على الأقل لإنشاء روتين.",
    chat_heading: "محادثة الروتين",
    ask_hint: "...اسأل عن روتينك",
    send: "إرسال",
    thinking: "...جارٍ التفكير",
    you_label: "أنت",
    advisor_label: "المستشار",
};

impl Locale {
    pub fn from_rtl(rtl: bool) -> Self {
        if rtl {
            Locale::Arabic
        } else {
            Locale::English
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Arabic)
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::English => Locale::Arabic,
            Locale::Arabic => Locale::English,
        }
    }

    pub fn strings(self) -> &'static UiStrings {
        match self {
            Locale::English => &ENGLISH,
            Locale::Arabic => &ARABIC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Locale;

    #[test]
    fn rtl_flag_round_trips_through_locale() {
        assert!(Locale::from_rtl(true).is_rtl());
        assert!(!Locale::from_rtl(false).is_rtl());
    }

    #[test]
    fn toggle_is_an_involution() {
        assert_eq!(Locale::English.toggled().toggled(), Locale::English);
        assert_eq!(Locale::English.toggled(), Locale::Arabic);
    }

    #[test]
    fn string_tables_differ_between_presets() {
        assert_ne!(
            Locale::English.strings().generate_routine,
            Locale::Arabic.strings().generate_routine
        );
    }
}
