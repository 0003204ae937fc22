//! Two-column frame wrapping the sign-in and sign-up forms.

use super::html::document;

pub fn auth_layout(title: &str, content: &str) -> String {
    let body = format!(
        r#"<div class="flex min-h-screen">
<section class="hidden lg:flex w-1/2 flex-col justify-center bg-brand p-10 text-white">
<p class="text-2xl font-semibold">StashBox</p>
<h1 class="mt-8 text-4xl font-bold">Manage your files with ease</h1>
<p class="mt-4 text-lg">one account to manage all of your files</p>
</section>
<section class="flex flex-1 flex-col items-center justify-center p-4 lg:p-10">
{content}
</section>
</div>"#
    );
    document(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_carries_marketing_copy_and_content() {
        let page = auth_layout("Sign In", "<form id=\"auth\"></form>");
        assert!(page.contains("Manage your files with ease"));
        assert!(page.contains("one account to manage all of your files"));
        assert!(page.contains("<form id=\"auth\"></form>"));
        assert!(page.contains("<title>Sign In | StashBox</title>"));
    }
}
