use crate::shared::dialog::submit::FormSubmitter;
use crate::shared::dialog::DialogContext;
use contracts::domain::a001_category::form::{slugify, FORM_FIELDS};
use contracts::domain::a001_category::{Category, CategoryForm, CategoryId, CategoryTree};
use leptos::prelude::*;

/// ViewModel of the category add/edit dialog
#[derive(Clone, Copy)]
pub struct CategoryDetailsViewModel {
    pub form: RwSignal<CategoryForm>,
    pub editing: RwSignal<Option<Category>>,
    /// Slug typed by hand; otherwise it follows the name.
    pub slug_touched: RwSignal<bool>,
    pub submit: FormSubmitter,
}

impl CategoryDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(CategoryForm::default()),
            editing: RwSignal::new(None),
            slug_touched: RwSignal::new(false),
            submit: FormSubmitter::new(FORM_FIELDS),
        }
    }

    pub fn reset(&self, row: Option<Category>) {
        self.form
            .set(row.as_ref().map(CategoryForm::from_category).unwrap_or_default());
        // an existing slug is never rewritten behind the user's back
        self.slug_touched
            .set(row.as_ref().is_some_and(|c| c.slug.is_some()));
        self.editing.set(row);
        self.submit.reset();
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.with(Option::is_some)
    }

    pub fn editing_id(&self) -> Option<CategoryId> {
        self.editing.with_untracked(|e| e.as_ref().map(|c| c.id))
    }

    pub fn title(&self) -> String {
        if self.is_edit_mode() {
            "Edit Category".to_string()
        } else {
            "Add Category".to_string()
        }
    }

    pub fn set_name(&self, name: String) {
        let follow = !self.slug_touched.get_untracked();
        self.form.update(|f| {
            if follow {
                f.slug = slugify(&name);
            }
            f.name = name;
        });
        self.submit.clear_field("name");
    }

    pub fn set_slug(&self, slug: String) {
        self.slug_touched.set(!slug.trim().is_empty());
        self.form.update(|f| f.slug = slug);
        self.submit.clear_field("slug");
    }

    pub fn existing_image(&self) -> Option<String> {
        self.editing.with(|e| {
            e.as_ref()
                .filter(|c| c.has_image())
                .and_then(|c| c.image.clone())
        })
    }

    pub fn save_command(
        &self,
        dialog: DialogContext<Category>,
        tree: Option<&CategoryTree>,
        image: Option<web_sys::File>,
    ) {
        let editing = self.editing_id();
        let draft = match self.form.with_untracked(|f| f.validate(editing, tree)) {
            Ok(draft) => draft,
            Err(errors) => {
                self.submit.reject(errors);
                return;
            }
        };
        let files = image
            .map(|file| vec![("image".to_string(), file)])
            .unwrap_or_default();
        self.submit
            .save::<Category, _>(editing, draft.to_payload(), files, move || dialog.close());
    }
}

impl Default for CategoryDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
