use std::fmt::Write;

use roster_core::csrf::CsrfToken;
use roster_core::method_override::METHOD_FIELD;
use roster_core::{escape_html, FieldErrors};
use roster_data::Page;

use crate::models::{StudentForm, StudentRecord};

/// `(field, label, input type)` for each form input, in display order.
const INPUTS: [(&str, &str, &str); 10] = [
    ("name", "Name", "text"),
    ("dob", "D.O.B", "date"),
    ("email", "Email Address", "email"),
    ("phone", "Phone", "text"),
    ("line_1", "Address Line 1", "text"),
    ("line_2", "Address Line 2", "text"),
    ("city", "City", "text"),
    ("state", "State", "text"),
    ("country", "Country", "text"),
    ("pincode", "Pincode", "text"),
];

pub fn index(page: &Page<StudentRecord>, token: &CsrfToken) -> String {
    let mut html = String::new();
    html.push_str(
        r#"<div class="container mt-5">
<div class="row align-items-center g-3 mb-3">
<div class="col-md-6"><h4 class="mb-0">Students</h4></div>
<div class="col-md-6 text-md-end"><a class="btn btn-primary" href="/students/create">Create</a></div>
</div>
<div class="table-responsive">
<table class="table table-hover table-bordered">
<thead>
<tr>
<th scope="col">#</th>
<th scope="col">Name</th>
<th scope="col">D.O.B</th>
<th scope="col">Email</th>
<th scope="col">Phone</th>
<th scope="col">City</th>
<th scope="col">Pincode</th>
<th class="text-center" scope="col">Action</th>
</tr>
</thead>
<tbody>
"#,
    );

    if page.is_empty() {
        html.push_str(r#"<tr><td class="text-center text-muted" colspan="8">No students found.</td></tr>"#);
        html.push('\n');
    }

    for (n, record) in (page.first_row_number()..).zip(&page.content) {
        let student = &record.student;
        let (city, pincode) = record
            .address
            .as_ref()
            .map(|a| (a.city.as_str(), a.pincode.as_str()))
            .unwrap_or(("", ""));
        let _ = write!(
            html,
            r#"<tr>
<th scope="row">{n}</th>
<td>{name}</td>
<td>{dob}</td>
<td>{email}</td>
<td>{phone}</td>
<td>{city}</td>
<td>{pincode}</td>
<td class="text-center">
<form action="/students/{id}" method="post">
{token}
<input type="hidden" name="{METHOD_FIELD}" value="delete">
<a class="text-success fw-medium" href="/students/{id}/edit">Edit</a>
<button class="border-0 bg-transparent text-danger fw-medium" type="submit">Delete</button>
</form>
</td>
</tr>
"#,
            id = student.id,
            name = escape_html(&student.name),
            dob = student.dob.format("%Y-%m-%d"),
            email = escape_html(&student.email),
            phone = escape_html(&student.phone),
            city = escape_html(city),
            pincode = escape_html(pincode),
            token = token.hidden_input(),
        );
    }

    html.push_str("</tbody>\n</table>\n");
    pagination(&mut html, page);
    html.push_str("</div>\n</div>\n");
    html
}

fn pagination<T>(html: &mut String, page: &Page<T>) {
    if page.total_pages <= 1 {
        return;
    }
    html.push_str("<nav class=\"mt-4\" aria-label=\"Student pages\">\n<ul class=\"pagination\">\n");
    let previous = page.page.saturating_sub(1);
    page_link(html, "&laquo; Previous", previous, !page.has_previous(), false);
    for number in 1..=page.total_pages {
        page_link(html, &number.to_string(), number, false, number == page.page);
    }
    let next = page.page.saturating_add(1);
    page_link(html, "Next &raquo;", next, !page.has_next(), false);
    html.push_str("</ul>\n</nav>\n");
}

fn page_link(html: &mut String, label: &str, target: u64, disabled: bool, active: bool) {
    if disabled {
        let _ = writeln!(
            html,
            r#"<li class="page-item disabled"><span class="page-link">{label}</span></li>"#
        );
    } else if active {
        let _ = writeln!(
            html,
            r#"<li class="page-item active" aria-current="page"><span class="page-link">{label}</span></li>"#
        );
    } else {
        let _ = writeln!(
            html,
            r#"<li class="page-item"><a class="page-link" href="/students?page={target}">{label}</a></li>"#
        );
    }
}

/// Which form is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn title(self) -> &'static str {
        match self {
            FormMode::Create => "New Student",
            FormMode::Edit(_) => "Edit Student",
        }
    }
}

/// Create and edit form. Values come from `form` and are printed as
/// submitted; each field with an error gets its message underneath.
pub fn form(mode: FormMode, form: &StudentForm, errors: &FieldErrors, token: &CsrfToken) -> String {
    let (action, method, submit) = match mode {
        FormMode::Create => ("/students".to_string(), None, "Create"),
        FormMode::Edit(id) => (format!("/students/{id}"), Some("put"), "Update"),
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="container mt-5">
<h4 class="mb-3">{title}</h4>
<form class="row g-3" action="{action}" method="post" novalidate>
{token}
"#,
        title = mode.title(),
        token = token.hidden_input(),
    );
    if let Some(method) = method {
        let _ = writeln!(
            html,
            r#"<input type="hidden" name="{METHOD_FIELD}" value="{method}">"#
        );
    }

    for (field, label, kind) in INPUTS {
        let error = errors.first(field);
        let _ = write!(
            html,
            r#"<div class="col-md-4">
<label class="form-label" for="{field}Inp">{label}</label>
<input class="form-control{invalid}" id="{field}Inp" type="{kind}" name="{field}" value="{value}">
"#,
            invalid = if error.is_some() { " is-invalid" } else { "" },
            value = escape_html(form.value(field)),
        );
        if let Some(message) = error {
            let _ = writeln!(
                html,
                r#"<small class="text-danger" data-error="{field}">{}</small>"#,
                escape_html(message)
            );
        }
        html.push_str("</div>\n");
    }

    let _ = write!(
        html,
        r#"<div class="col-12">
<button class="btn btn-primary" type="submit">{submit}</button>
<a class="btn btn-link" href="/students">Back</a>
</div>
</form>
</div>
"#
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FIELDS;

    #[test]
    fn form_has_an_input_per_field() {
        let fields: Vec<&str> = INPUTS.iter().map(|(f, _, _)| *f).collect();
        assert_eq!(fields, FIELDS);
    }
}
