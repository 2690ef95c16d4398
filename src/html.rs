use scraper::{ElementRef, Html};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Constraint {
    Class(&'static str),
    Attr(&'static str, &'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    tag: &'static str,
    constraints: Vec<Constraint>,
}

impl Query {
    pub fn tag(tag: &'static str) -> Self {
        Query { tag, constraints: Vec::new() }
    }

    /// Requires `class` among the element's classes. Chain for several.
    pub fn class(mut self, class: &'static str) -> Self {
        self.constraints.push(Constraint::Class(class));
        self
    }

    pub fn id(self, id: &'static str) -> Self {
        self.attr("id", id)
    }

    /// Requires attribute `name` to equal `value` exactly.
    pub fn attr(mut self, name: &'static str, value: &'static str) -> Self {
        self.constraints.push(Constraint::Attr(name, value));
        self
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let el = element.value();
        if !el.name().eq_ignore_ascii_case(self.tag) {
            return false;
        }
        self.constraints.iter().all(|c| match c {
            Constraint::Class(class) => el.classes().any(|have| have == *class),
            Constraint::Attr(name, value) => el.attr(name) == Some(*value),
        })
    }
}

/// Lookup shared by whole documents and single elements.
pub trait Find {
    fn find_all<'a>(&'a self, query: &Query) -> Vec<ElementRef<'a>>;

    fn find_first<'a>(&'a self, query: &Query) -> Option<ElementRef<'a>>;
}

/// Descendants of `element` matching `query`, in document order.
fn matching<'b>(element: ElementRef<'b>, query: &Query) -> impl Iterator<Item = ElementRef<'b>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| query.matches(el))
}

impl Find for ElementRef<'_> {
    fn find_all<'a>(&'a self, query: &Query) -> Vec<ElementRef<'a>> {
        matching(*self, query).collect()
    }

    fn find_first<'a>(&'a self, query: &Query) -> Option<ElementRef<'a>> {
        matching(*self, query).next()
    }
}

impl Find for Html {
    fn find_all<'a>(&'a self, query: &Query) -> Vec<ElementRef<'a>> {
        let root = self.root_element();
        let mut found: Vec<ElementRef<'a>> = matching(root, query).collect();
        if query.matches(&root) {
            found.insert(0, root);
        }
        found
    }

    fn find_first<'a>(&'a self, query: &Query) -> Option<ElementRef<'a>> {
        let root = self.root_element();
        if query.matches(&root) {
            return Some(root);
        }
        matching(root, query).next()
    }
}

/// All descendant text of `element`, concatenated.
pub fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <ul class="dropdown-menu SearchBar-keywordSearch">
            <li><a href="/state/al/index.htm">Alabama</a></li>
            <li><a href="/state/ak/index.htm">Alaska</a></li>
          </ul>
          <ul class="dropdown-menu"><li><a href="/other">Other</a></li></ul>
          <div id="parkListResultsArea"><h3><a href="abli/">Abraham <b>Lincoln</b></a></h3></div>
          <span itemprop="postalCode"> 49931 </span>
        </body></html>
    "#;

    #[test]
    fn class_constraints_must_all_hold() {
        let doc = Html::parse_document(PAGE);
        let query = Query::tag("ul").class("dropdown-menu").class("SearchBar-keywordSearch");

        let found = doc.find_all(&query);
        assert_eq!(found.len(), 1);

        let links = found[0].find_all(&Query::tag("a"));
        let names: Vec<String> = links.iter().map(text_of).collect();
        assert_eq!(names, vec!["Alabama", "Alaska"]);
    }

    #[test]
    fn id_and_attribute_lookup() {
        let doc = Html::parse_document(PAGE);

        let area = doc.find_first(&Query::tag("div").id("parkListResultsArea")).unwrap();
        let heading = area.find_first(&Query::tag("h3")).unwrap();
        assert_eq!(text_of(&heading), "Abraham Lincoln");

        let zip = doc.find_first(&Query::tag("span").attr("itemprop", "postalCode")).unwrap();
        assert_eq!(text_of(&zip).trim(), "49931");
    }

    #[test]
    fn absent_element_is_none() {
        let doc = Html::parse_document(PAGE);
        assert!(doc.find_first(&Query::tag("span").attr("itemprop", "telephone")).is_none());
        assert!(doc.find_all(&Query::tag("table")).is_empty());
    }

    #[test]
    fn element_search_excludes_itself() {
        let doc = Html::parse_document(PAGE);
        let area = doc.find_first(&Query::tag("div")).unwrap();
        assert!(area.find_first(&Query::tag("div")).is_none());
    }
}
